//! Putting a compressed bitmap file together.

use super::{headers::*, rle::*};
use crate::error::{BmpRleError, FormatError};
use alloc::vec::Vec;

/// The 16 `[b, g, r, 0]` colors of a 4bpp image.
pub type Palette = [[u8; 4]; 16];

/// Gets the 16 color palette that directly follows the headers.
pub fn read_palette(bytes: &[u8]) -> Result<Palette, FormatError> {
  bytes
    .get(HEADERS_LEN..HEADERS_LEN + PALETTE_LEN)
    .map(bytemuck::pod_read_unaligned::<Palette>)
    .ok_or(FormatError::TruncatedPalette)
}

/// Gets the pixel data, from the header's offset to the end of the file.
pub fn pixel_data<'b>(bytes: &'b [u8], file_header: &FileHeader) -> Result<&'b [u8], FormatError> {
  usize::try_from(file_header.pixel_data_offset)
    .ok()
    .and_then(|offset| bytes.get(offset..))
    .ok_or(FormatError::PixelDataOutOfBounds {
      offset: file_header.pixel_data_offset,
      len: bytes.len(),
    })
}

/// Sizes to report after compressing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionReport {
  /// Bytes in the input file.
  pub original_size: usize,
  /// Bytes in the output file.
  pub compressed_size: usize,
}
impl CompressionReport {
  /// How much smaller the output is, as a percent of the input.
  ///
  /// Negative when the output grew. An empty input gives 0.
  #[inline]
  #[must_use]
  pub fn ratio_percent(&self) -> f64 {
    if self.original_size == 0 {
      return 0.0;
    }
    (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
  }
}

/// An RLE4 compressed bitmap file, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBmp {
  pub file_header: FileHeader,
  pub info_header: InfoHeader,
  pub palette: Palette,
  /// The RLE4 stream, ending with the end of bitmap marker.
  pub data: Vec<u8>,
}
impl CompressedBmp {
  /// Total size of the file [`to_bytes`](Self::to_bytes) makes.
  #[inline]
  #[must_use]
  pub fn file_len(&self) -> usize {
    HEADERS_LEN + PALETTE_LEN + self.data.len()
  }

  /// The bytes of the complete file: headers, palette, then pixel data.
  #[must_use]
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(self.file_len());
    out.extend_from_slice(&write_headers(&self.file_header, &self.info_header));
    out.extend_from_slice(bytemuck::bytes_of(&self.palette));
    out.extend_from_slice(&self.data);
    out
  }
}

/// Compresses the bytes of an uncompressed 16 color bitmap file.
///
/// The headers are checked with [`parse_headers`] and [`validate`], the pixel
/// data is [RLE4 encoded](rle4_encode_bitmap), and the headers are updated
/// with [`rewrite`]. The palette is kept as is. The output puts the pixel data
/// right after the palette, so the pixel data offset is set to match.
///
/// An image whose compressed file wouldn't fit the header's `u32` size fields
/// gives [`FormatError::DimensionsTooLarge`]. Absurd heights are caught before
/// any encoding is done.
pub fn compress_bmp(bytes: &[u8]) -> Result<CompressedBmp, BmpRleError> {
  let (file_header, info_header) = parse_headers(bytes)?;
  validate(&info_header)?;
  let palette = read_palette(bytes)?;
  let pixels = pixel_data(bytes, &file_header)?;
  log::debug!(
    "compressing {}x{} bitmap, {} bytes of pixel data",
    info_header.width,
    info_header.height.unsigned_abs(),
    pixels.len()
  );
  if info_header.height > 0 {
    log::trace!("bottom-up image, lines are encoded in file order");
  }

  // `validate` already refused negative widths.
  let width = usize::try_from(info_header.width).unwrap_or(0);
  let too_large = FormatError::DimensionsTooLarge {
    width: info_header.width,
    height: info_header.height,
  };
  let data_offset = (HEADERS_LEN + PALETTE_LEN) as u32;
  let size_limit = (u32::MAX - data_offset) as u64;
  if min_rle4_len(width, info_header.height) > size_limit {
    return Err(too_large.into());
  }
  let data = rle4_encode_bitmap(pixels, width, info_header.height);
  let compressed_size = u32::try_from(data.len())
    .ok()
    .filter(|&size| u64::from(size) <= size_limit)
    .ok_or(too_large)?;
  let (mut file_header, info_header) = rewrite(&file_header, &info_header, compressed_size);
  if file_header.pixel_data_offset != data_offset {
    log::warn!(
      "moving pixel data offset from {} to {data_offset}",
      file_header.pixel_data_offset
    );
    file_header.pixel_data_offset = data_offset;
  }
  Ok(CompressedBmp { file_header, info_header, palette, data })
}

/// The smallest RLE4 stream any image of this size can encode to.
///
/// Each line is at least one record plus its end of line, and then there's
/// the end of bitmap.
#[inline]
#[must_use]
const fn min_rle4_len(width: usize, height: i32) -> u64 {
  let per_line = if width > 0 { 4 } else { 2 };
  (height.unsigned_abs() as u64) * per_line + 2
}

/// Compresses a bitmap file and reports the before and after sizes.
pub fn compress_bmp_with_report(bytes: &[u8]) -> Result<(Vec<u8>, CompressionReport), BmpRleError> {
  let out = compress_bmp(bytes)?.to_bytes();
  let report = CompressionReport { original_size: bytes.len(), compressed_size: out.len() };
  log::info!(
    "{} bytes -> {} bytes ({:.1}% smaller)",
    report.original_size,
    report.compressed_size,
    report.ratio_percent()
  );
  Ok((out, report))
}
