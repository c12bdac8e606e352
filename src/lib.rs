#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]

//! Run-length encoding for 16 color Windows Bitmap images.
//!
//! * The [`bmp`] module has the BMP `BI_RLE4` codec, which works on lines of
//!   4 bits per pixel data, and the header handling needed to turn an
//!   uncompressed 4bpp `.bmp` file into a compressed one.
//! * The [`byte_rle`] module is a much simpler RLE for plain bytes, using an
//!   escape byte range, with [`hex`] strings as the usual way in and out.
//!
//! Everything works on complete in-memory buffers. Reading and writing files
//! is left to the caller (or the `bmp-rle4` binary, with the `cli` feature).

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod ascii_array;
pub use ascii_array::*;

pub mod error;
pub use error::*;

mod parser_helpers;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod bmp;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod byte_rle;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod hex;
