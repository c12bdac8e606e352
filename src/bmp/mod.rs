//! Module for Windows Bitmap files (BMP), and their 4bpp run-length encoding.
//!
//! ## The Container
//!
//! Note: All multi-byte values in BMP are always little-endian encoded.
//!
//! * A bitmap file starts with a 14 byte "file header": the `"BM"` tag, the
//!   total size of the file, two reserved `u16` values, and the position of
//!   the pixel data within the file.
//! * Next is an "info header". There's many versions of this header, and the
//!   first 4 bytes are always its size. Only the 40 byte `BITMAPINFOHEADER` is
//!   handled here.
//! * A 4bpp image then has a color table of 16 `[b, g, r, 0]` entries.
//! * Then the pixel array. Uncompressed lines are padded to 4 bytes, and
//!   within each byte the leftmost pixel is the highest bits.
//!
//! ## Compressing
//!
//! [`compress_bmp`] turns an uncompressed 4bpp file into an RLE4 file:
//! [`parse_headers`], [`validate`], [`rle4_encode_bitmap`], [`rewrite`], and
//! then the headers, palette, and compressed stream are written back out.

mod container;
mod headers;
mod nibble;
mod raw_headers;
mod rle;

pub use container::*;
pub use headers::*;
pub use nibble::*;
pub use rle::*;
