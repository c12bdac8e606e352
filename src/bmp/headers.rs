use super::raw_headers::*;
use crate::{ascii_array::AsciiArray, error::FormatError, parser_helpers::*};

/// Size of the file header plus the `BITMAPINFOHEADER` info header.
pub const HEADERS_LEN: usize = 14 + 40;

/// Size of a 16 entry palette of `[b, g, r, 0]` values.
pub const PALETTE_LEN: usize = 16 * 4;

/// The tag that a Windows Bitmap file starts with.
pub const BMP_TAG: AsciiArray<2> = AsciiArray(*b"BM");

/// The header at the start of all BMP files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileHeader {
  /// Should be `"BM"`.
  pub tag: AsciiArray<2>,

  /// The total size of the file.
  pub total_size: u32,

  /// Reserved, generally 0.
  pub reserved1: u16,

  /// Reserved, generally 0.
  pub reserved2: u16,

  /// The byte index within the file where the pixel data starts.
  pub pixel_data_offset: u32,
}
impl From<BitmapFileHeader> for FileHeader {
  #[inline]
  fn from(raw: BitmapFileHeader) -> Self {
    Self {
      tag: raw.ty,
      total_size: raw.file_size.get(),
      reserved1: raw.reserved1.get(),
      reserved2: raw.reserved2.get(),
      pixel_data_offset: raw.bitmap_offset.get(),
    }
  }
}
impl From<FileHeader> for [u8; 14] {
  #[inline]
  fn from(h: FileHeader) -> Self {
    let mut a = [0; 14];
    a[0..2].copy_from_slice(h.tag.0.as_slice());
    a[2..6].copy_from_slice(h.total_size.to_le_bytes().as_slice());
    a[6..8].copy_from_slice(h.reserved1.to_le_bytes().as_slice());
    a[8..10].copy_from_slice(h.reserved2.to_le_bytes().as_slice());
    a[10..14].copy_from_slice(h.pixel_data_offset.to_le_bytes().as_slice());
    a
  }
}

/// The 40 byte `BITMAPINFOHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InfoHeader {
  /// Size of this header, 40.
  pub size: u32,

  /// Image pixel width.
  pub width: i32,

  /// Image pixel height.
  ///
  /// * A positive height indicates that the origin is the **bottom** left.
  /// * A negative height indicates that the image origin is the **top** left.
  pub height: i32,

  /// Color planes, always 1.
  pub planes: u16,

  /// Bits per pixel.
  pub bits_per_pixel: u16,

  /// The compression tag. 0 is uncompressed, 2 is RLE4.
  pub compression: u32,

  /// The number of bytes in the pixel data. Can be 0 for uncompressed images.
  pub image_size: u32,

  /// horizontal pixels per meter
  pub x_pels_per_meter: i32,

  /// vertical pixels per meter
  pub y_pels_per_meter: i32,

  /// Palette entries used, 0 means the full `2**bits_per_pixel`.
  pub colors_used: u32,

  /// The number of "important" colors, 0 means all of them.
  pub important_colors: u32,
}
impl From<BitmapInfoHeader> for InfoHeader {
  #[inline]
  fn from(raw: BitmapInfoHeader) -> Self {
    Self {
      size: raw.size.get(),
      width: raw.width.get(),
      height: raw.height.get(),
      planes: raw.planes.get(),
      bits_per_pixel: raw.bits_per_pixel.get(),
      compression: raw.compression.get(),
      image_size: raw.image_size.get(),
      x_pels_per_meter: raw.pixels_per_meter_x.get(),
      y_pels_per_meter: raw.pixels_per_meter_y.get(),
      colors_used: raw.colors_used.get(),
      important_colors: raw.important_colors.get(),
    }
  }
}
impl From<InfoHeader> for [u8; 40] {
  #[inline]
  #[rustfmt::skip]
  fn from(h: InfoHeader) -> Self {
    let mut a = [0; 40];
    a[0..4].copy_from_slice(h.size.to_le_bytes().as_slice());
    a[4..8].copy_from_slice(h.width.to_le_bytes().as_slice());
    a[8..12].copy_from_slice(h.height.to_le_bytes().as_slice());
    a[12..14].copy_from_slice(h.planes.to_le_bytes().as_slice());
    a[14..16].copy_from_slice(h.bits_per_pixel.to_le_bytes().as_slice());
    a[16..20].copy_from_slice(h.compression.to_le_bytes().as_slice());
    a[20..24].copy_from_slice(h.image_size.to_le_bytes().as_slice());
    a[24..28].copy_from_slice(h.x_pels_per_meter.to_le_bytes().as_slice());
    a[28..32].copy_from_slice(h.y_pels_per_meter.to_le_bytes().as_slice());
    a[32..36].copy_from_slice(h.colors_used.to_le_bytes().as_slice());
    a[36..40].copy_from_slice(h.important_colors.to_le_bytes().as_slice());
    a
  }
}
impl InfoHeader {
  /// Bytes per line of pixels, without the 4-byte line padding.
  ///
  /// Only meaningful for 4bpp images. A negative width gives 0.
  #[inline]
  #[must_use]
  pub fn nibble_bytes_per_line(&self) -> usize {
    nibble_bytes_per_line(usize::try_from(self.width).unwrap_or(0))
  }
}

/// Parses the file header and info header from the start of a bitmap file.
///
/// ## Failure
/// * Fewer than 54 bytes.
/// * The tag isn't `"BM"`.
/// * The info header isn't the 40 byte `BITMAPINFOHEADER` version, so the
///   fixed layout read here wouldn't line up with the file.
pub fn parse_headers(bytes: &[u8]) -> Result<(FileHeader, InfoHeader), FormatError> {
  if bytes.len() < HEADERS_LEN {
    return Err(FormatError::FileTooShort { len: bytes.len() });
  }
  let (file_header, rest) =
    try_pull_pod::<BitmapFileHeader>(bytes).ok_or(FormatError::FileTooShort { len: bytes.len() })?;
  if file_header.ty != BMP_TAG {
    return Err(FormatError::BadSignature);
  }
  let (info_header, _rest) =
    try_pull_pod::<BitmapInfoHeader>(rest).ok_or(FormatError::FileTooShort { len: bytes.len() })?;
  if info_header.size.get() != 40 {
    return Err(FormatError::UnsupportedHeaderLayout { size: info_header.size.get() });
  }
  Ok((FileHeader::from(file_header), InfoHeader::from(info_header)))
}

/// Checks that an image can be RLE4 compressed.
///
/// ## Failure
/// * The bit depth isn't 4.
/// * The image already uses compression.
/// * The width is negative.
/// * The unpadded bytes per line aren't a multiple of 4.
pub fn validate(info: &InfoHeader) -> Result<(), FormatError> {
  if info.bits_per_pixel != 4 {
    return Err(FormatError::UnsupportedBitDepth { bits: info.bits_per_pixel });
  }
  if info.compression != BI_RGB {
    return Err(FormatError::AlreadyCompressed { compression: info.compression });
  }
  if info.width < 0 {
    return Err(FormatError::BadDimensions { width: info.width });
  }
  let stride = info.nibble_bytes_per_line();
  if stride % 4 != 0 {
    return Err(FormatError::MisalignedStride { stride });
  }
  Ok(())
}

/// Updates the headers to describe RLE4 pixel data of `compressed_size`
/// bytes that directly follows the headers and palette.
///
/// Only the file size, compression tag, and image size change.
#[must_use]
pub fn rewrite(
  file_header: &FileHeader, info_header: &InfoHeader, compressed_size: u32,
) -> (FileHeader, InfoHeader) {
  let total_size = (HEADERS_LEN + PALETTE_LEN) as u32;
  (
    FileHeader { total_size: total_size.saturating_add(compressed_size), ..*file_header },
    InfoHeader { compression: BI_RLE4, image_size: compressed_size, ..*info_header },
  )
}

/// Writes both headers out as the 54 bytes at the start of a file.
#[inline]
#[must_use]
pub fn write_headers(file_header: &FileHeader, info_header: &InfoHeader) -> [u8; HEADERS_LEN] {
  let mut a = [0; HEADERS_LEN];
  a[..14].copy_from_slice(&<[u8; 14]>::from(*file_header));
  a[14..].copy_from_slice(&<[u8; 40]>::from(*info_header));
  a
}
