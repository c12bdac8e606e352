//! Reading 4bpp pixels out of a packed line of bytes.
//!
//! Each byte holds two pixels, and the leftmost pixel is in the high bits.

/// The longest run (or literal span) a single RLE4 record can describe.
pub const MAX_RECORD_PIXELS: usize = 255;

/// Gets the palette index at `x` within a packed 4bpp line.
///
/// Reads past the `width`, or past the end of `line`, give 0. A short or
/// malformed line is treated as if it were zero padded.
#[inline]
#[must_use]
pub const fn get_pixel(line: &[u8], x: usize, width: usize) -> u8 {
  if x >= width {
    return 0;
  }
  let i = x / 2;
  if i >= line.len() {
    return 0;
  }
  if x % 2 == 0 {
    line[i] >> 4
  } else {
    line[i] & 0b1111
  }
}

/// If the pixel at `x` has the same value as the pixel right after it.
///
/// Always `false` for the last pixel of the line.
#[inline]
#[must_use]
pub const fn has_repetition(line: &[u8], x: usize, width: usize) -> bool {
  if x.saturating_add(1) >= width {
    return false;
  }
  get_pixel(line, x, width) == get_pixel(line, x + 1, width)
}

/// Counts how many pixels starting at `x` share the value at `x`.
///
/// The count is capped at [`MAX_RECORD_PIXELS`], and is 0 when `x` is past the
/// end of the line.
#[inline]
#[must_use]
pub fn run_length_at(line: &[u8], x: usize, width: usize) -> usize {
  if x >= width {
    return 0;
  }
  let first = get_pixel(line, x, width);
  let limit = (width - x).min(MAX_RECORD_PIXELS);
  (1..limit).take_while(|&i| get_pixel(line, x + i, width) == first).count() + 1
}
