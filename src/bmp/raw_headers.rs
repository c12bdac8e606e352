//! The on-disk header structs, exactly as the bytes are laid out.
//!
//! These aren't exposed to users, [`FileHeader`](super::FileHeader) and
//! [`InfoHeader`](super::InfoHeader) are the friendly forms.

use crate::ascii_array::AsciiArray;
use pack1::*;

pub(crate) const BI_RGB: u32 = 0;
pub(crate) const BI_RLE4: u32 = 2;

#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct BitmapFileHeader {
  pub ty: AsciiArray<2>,
  pub file_size: U32LE,
  pub reserved1: U16LE,
  pub reserved2: U16LE,
  pub bitmap_offset: U32LE,
}

#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct BitmapInfoHeader {
  pub size: U32LE,
  pub width: I32LE,
  pub height: I32LE,
  pub planes: U16LE,
  pub bits_per_pixel: U16LE,
  pub compression: U32LE,
  pub image_size: U32LE,
  pub pixels_per_meter_x: I32LE,
  pub pixels_per_meter_y: I32LE,
  pub colors_used: U32LE,
  pub important_colors: U32LE,
}

const _: () = assert!(core::mem::size_of::<BitmapFileHeader>() == 14);
const _: () = assert!(core::mem::size_of::<BitmapInfoHeader>() == 40);
