use core::fmt;

/// The bitmap container can't be compressed.
///
/// These all come out of header parsing and validation, before any pixel
/// data is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FormatError {
  /// Fewer bytes than a file header and info header need (54).
  FileTooShort { len: usize },
  /// The file doesn't start with `"BM"`.
  BadSignature,
  /// The info header isn't the 40 byte `BITMAPINFOHEADER` layout.
  UnsupportedHeaderLayout { size: u32 },
  /// Only 4 bits per pixel can be RLE4 compressed.
  UnsupportedBitDepth { bits: u16 },
  /// The pixel data already uses some compression.
  AlreadyCompressed { compression: u32 },
  /// Negative pixel width.
  BadDimensions { width: i32 },
  /// The unpadded bytes per line must already be a multiple of 4.
  MisalignedStride { stride: usize },
  /// The 16 color palette runs past the end of the file.
  TruncatedPalette,
  /// The pixel data offset is past the end of the file.
  PixelDataOutOfBounds { offset: u32, len: usize },
  /// The compressed file would be too big for the `u32` size fields.
  DimensionsTooLarge { width: i32, height: i32 },
}
impl fmt::Display for FormatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FileTooShort { len } => {
        write!(f, "file too short for a bitmap: {len} bytes, need at least 54")
      }
      Self::BadSignature => write!(f, "bad signature: not a BM bitmap file"),
      Self::UnsupportedHeaderLayout { size } => {
        write!(f, "binary layout mismatch: info header size is {size}, expected 40")
      }
      Self::UnsupportedBitDepth { bits } => {
        write!(f, "unsupported bit depth: {bits} bits per pixel, need a 16 color (4 bit) image")
      }
      Self::AlreadyCompressed { compression } => {
        write!(f, "unsupported compression: file is already compressed (tag {compression})")
      }
      Self::BadDimensions { width } => write!(f, "bad image width: {width}"),
      Self::MisalignedStride { stride } => {
        write!(f, "alignment violation: {stride} bytes per line is not a multiple of 4")
      }
      Self::TruncatedPalette => write!(f, "file too short: palette is truncated"),
      Self::PixelDataOutOfBounds { offset, len } => {
        write!(f, "binary layout mismatch: pixel data offset {offset} is past the end ({len} bytes)")
      }
      Self::DimensionsTooLarge { width, height } => {
        write!(f, "image too large: a {width}x{height} bitmap can't fit in a BMP file")
      }
    }
  }
}
impl core::error::Error for FormatError {}

/// An RLE4 stream couldn't be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Rle4DecodeError {
  /// The stream stopped partway through a record, or before end of bitmap.
  UnexpectedEnd,
  /// A record would put more pixels in the row than the row's width.
  RowOverflow,
  /// The row was full but the next record wasn't an end of line.
  MissingEndOfLine,
  /// An escape code that the encoder never produces (such as a delta).
  UnexpectedRecord { code: u8 },
  /// All rows were decoded but the stream doesn't close with `(0, 1)`.
  MissingEndOfBitmap,
}
impl fmt::Display for Rle4DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnexpectedEnd => write!(f, "rle4 stream ended early"),
      Self::RowOverflow => write!(f, "rle4 record overflows the row width"),
      Self::MissingEndOfLine => write!(f, "rle4 row is full but no end of line follows"),
      Self::UnexpectedRecord { code } => write!(f, "unexpected rle4 escape code {code}"),
      Self::MissingEndOfBitmap => write!(f, "rle4 stream doesn't end with an end of bitmap"),
    }
  }
}
impl core::error::Error for Rle4DecodeError {}

/// A hex string couldn't be turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HexError {
  /// Hex digits come in pairs, one pair per byte.
  OddLength,
  /// The character at this byte index isn't a hex digit.
  InvalidDigit { index: usize },
}
impl fmt::Display for HexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::OddLength => write!(f, "hex string has an odd number of digits"),
      Self::InvalidDigit { index } => write!(f, "invalid hex digit at index {index}"),
    }
  }
}
impl core::error::Error for HexError {}

/// An error from the `bmp_rle4` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmpRleError {
  /// The container headers were rejected.
  Format(FormatError),
  /// An RLE4 stream was malformed.
  Rle4(Rle4DecodeError),
  /// A hex string was malformed.
  Hex(HexError),
}
impl From<FormatError> for BmpRleError {
  #[inline]
  fn from(e: FormatError) -> Self {
    Self::Format(e)
  }
}
impl From<Rle4DecodeError> for BmpRleError {
  #[inline]
  fn from(e: Rle4DecodeError) -> Self {
    Self::Rle4(e)
  }
}
impl From<HexError> for BmpRleError {
  #[inline]
  fn from(e: HexError) -> Self {
    Self::Hex(e)
  }
}
impl fmt::Display for BmpRleError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Format(e) => fmt::Display::fmt(e, f),
      Self::Rle4(e) => fmt::Display::fmt(e, f),
      Self::Hex(e) => fmt::Display::fmt(e, f),
    }
  }
}
impl core::error::Error for BmpRleError {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      Self::Format(e) => Some(e),
      Self::Rle4(e) => Some(e),
      Self::Hex(e) => Some(e),
    }
  }
}
