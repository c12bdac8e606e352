//! The BMP format's 4bpp run-length encoding (`BI_RLE4`).
//!
//! The stream is read two bytes at a time.
//!
//! * If the first byte is **non-zero** it's a run: the first byte is how many
//!   pixels to output, and the second byte holds two palette indexes that the
//!   output alternates between (high bits first). The encoder only ever writes
//!   runs of a single index, so both halves of the byte are the same.
//! * If the first byte is **zero** the second byte is an escape code:
//!   * 0: end of line
//!   * 1: end of bitmap
//!   * otherwise a "literal" of that many pixels follows, packed two per byte.
//!     The literal bytes are padded to an even count so that the stream stays
//!     in `[u8; 2]` steps.
//!
//! The encoder here writes literals of any length from 1 up, so a literal of
//! 1 or 2 pixels looks like an end of bitmap or a delta escape when read
//! without context. The reader is width-aware to tell them apart: while the
//! current line still needs pixels a zero first byte starts a literal, and
//! only once the line is full is `(0, 0)` the end of line marker. The end of
//! bitmap marker is expected once every line of the image has been closed.

use super::nibble::*;
use crate::{error::Rle4DecodeError, parser_helpers::*};
use alloc::{vec, vec::Vec};
use bitfrob::u8_replicate_bits;
use core::num::NonZeroU8;

/// Escape pair that closes every line.
pub const RLE4_END_OF_LINE: [u8; 2] = [0, 0];

/// Escape pair that closes the whole bitmap.
pub const RLE4_END_OF_BITMAP: [u8; 2] = [0, 1];

/// Appends the RLE4 records for one packed line of pixels to `out`.
///
/// `line` should be the `ceil(width/2)` bytes of the line (without the 4-byte
/// line padding). Pixels that `line` is too short to hold are encoded as 0.
/// The records always end with [`RLE4_END_OF_LINE`].
pub fn rle4_encode_line(line: &[u8], width: usize, out: &mut Vec<u8>) {
  let mut x = 0;
  while x < width {
    let pixel = get_pixel(line, x, width);
    let count = run_length_at(line, x, width);
    if count >= 2 {
      out.extend_from_slice(&[count as u8, u8_replicate_bits(4, pixel)]);
      x += count;
      continue;
    }

    // Gather a literal span. The span stops right before any pixel that
    // starts a repetition, checking only one pixel ahead.
    let mut packed = [0_u8; MAX_RECORD_PIXELS / 2 + 1];
    let mut packed_len = 0;
    let mut span = 0;
    while x + span < width && span < MAX_RECORD_PIXELS && !has_repetition(line, x + span, width) {
      let p1 = get_pixel(line, x + span, width);
      if x + span + 1 < width && span + 2 <= MAX_RECORD_PIXELS {
        let p2 = get_pixel(line, x + span + 1, width);
        packed[packed_len] = (p1 << 4) | p2;
        packed_len += 1;
        span += 2;
      } else {
        packed[packed_len] = p1 << 4;
        packed_len += 1;
        span += 1;
        break;
      }
    }

    if span > 0 {
      out.extend_from_slice(&[0, span as u8]);
      out.extend_from_slice(&packed[..packed_len]);
      if packed_len % 2 != 0 {
        out.push(0);
      }
      x += span;
    } else {
      // can't normally happen: a count of 1 means no repetition at `x`.
      out.extend_from_slice(&[1, u8_replicate_bits(4, pixel)]);
      x += 1;
    }
  }
  out.extend_from_slice(&RLE4_END_OF_LINE);
}

/// RLE4 encodes all lines of a 4bpp image.
///
/// * `pixel_data` is the uncompressed pixel array, each line padded to 4
///   bytes. Lines that are short or missing are encoded as 0 pixels rather
///   than failing.
/// * `height` can be negative (top-down images), only its magnitude matters.
///   Lines are encoded in the order they're stored.
///
/// The output is every line's records, followed by [`RLE4_END_OF_BITMAP`].
pub fn rle4_encode_bitmap(pixel_data: &[u8], width: usize, height: i32) -> Vec<u8> {
  let line_count = height.unsigned_abs() as usize;
  let bytes_per_line = nibble_bytes_per_line(width);
  let stride = padded_nibble_bytes_per_line(width);
  let expected_len = line_count.saturating_mul(stride);
  if pixel_data.len() < expected_len {
    log::warn!(
      "pixel data is {} bytes but {line_count} lines of {stride} need {expected_len}, padding with 0",
      pixel_data.len()
    );
  }
  let mut out = Vec::with_capacity(expected_len / 2);
  for y in 0..line_count {
    let line = pixel_data.get(y.saturating_mul(stride)..).unwrap_or_default();
    let line = &line[..line.len().min(bytes_per_line)];
    let before = out.len();
    rle4_encode_line(line, width, &mut out);
    log::trace!("line {y}: {bytes_per_line} bytes -> {} bytes", out.len() - before);
  }
  out.extend_from_slice(&RLE4_END_OF_BITMAP);
  log::debug!("rle4 encoded {width}x{line_count}: {} bytes", out.len());
  out
}

/// One record of an RLE4 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rle4Record<'b> {
  /// `count` pixels, alternating `index_h` and `index_l` (starting with
  /// `index_h`).
  Run { count: NonZeroU8, index_h: u8, index_l: u8 },
  /// `count` pixels given directly, packed two per byte, high bits first.
  ///
  /// `packed` doesn't include the padding byte (if any).
  Literal { count: NonZeroU8, packed: &'b [u8] },
  /// x = 0, next line.
  EndOfLine,
  /// End of the RLE sequence.
  EndOfBitmap,
}

/// Pulls the next record off the front of `rest`.
///
/// `x` is the position within the current line, and is updated as records
/// are pulled. Gives `None` if `rest` is empty.
fn pull_record<'b>(
  rest: &mut &'b [u8], width: usize, x: &mut usize,
) -> Option<Result<Rle4Record<'b>, Rle4DecodeError>> {
  let bytes: &'b [u8] = *rest;
  let ([a, b], tail) = match try_pull_byte_array::<2>(bytes) {
    Some(pair) => pair,
    None if bytes.is_empty() => return None,
    None => {
      *rest = &[];
      return Some(Err(Rle4DecodeError::UnexpectedEnd));
    }
  };
  *rest = tail;
  let remaining = width.saturating_sub(*x);
  Some(match NonZeroU8::new(a) {
    Some(_) if remaining == 0 => Err(Rle4DecodeError::MissingEndOfLine),
    Some(count) if usize::from(count.get()) > remaining => Err(Rle4DecodeError::RowOverflow),
    Some(count) => {
      *x += usize::from(count.get());
      Ok(Rle4Record::Run { count, index_h: b >> 4, index_l: b & 0b1111 })
    }
    None if remaining == 0 => match b {
      0 => {
        *x = 0;
        Ok(Rle4Record::EndOfLine)
      }
      1 => Ok(Rle4Record::EndOfBitmap),
      2 => Err(Rle4DecodeError::UnexpectedRecord { code: 2 }),
      _ => Err(Rle4DecodeError::MissingEndOfLine),
    },
    // a line can end early, the rest of it is left as 0.
    None if b == 0 => {
      *x = 0;
      Ok(Rle4Record::EndOfLine)
    }
    None => {
      let count = usize::from(b);
      if count > remaining {
        return Some(Err(Rle4DecodeError::RowOverflow));
      }
      let packed_len = nibble_bytes_per_line(count);
      let padded_len = packed_len + packed_len % 2;
      if tail.len() < padded_len {
        *rest = &[];
        return Some(Err(Rle4DecodeError::UnexpectedEnd));
      }
      let (packed, tail) = tail.split_at(padded_len);
      *rest = tail;
      *x += count;
      // `b` was checked to be non-zero by the arm above.
      NonZeroU8::new(b)
        .map(|count| Rle4Record::Literal { count, packed: &packed[..packed_len] })
        .ok_or(Rle4DecodeError::UnexpectedEnd)
    }
  })
}

/// Pulls the `(0, 1)` that has to follow the last line of a bitmap.
fn pull_end_of_bitmap<'b>(rest: &mut &'b [u8]) -> Result<Rle4Record<'b>, Rle4DecodeError> {
  let bytes: &'b [u8] = *rest;
  let out = match try_pull_byte_array::<2>(bytes) {
    Some((RLE4_END_OF_BITMAP, tail)) => {
      *rest = tail;
      return Ok(Rle4Record::EndOfBitmap);
    }
    Some(_) => Err(Rle4DecodeError::MissingEndOfBitmap),
    None => Err(Rle4DecodeError::UnexpectedEnd),
  };
  *rest = &[];
  out
}

/// Iterates the records of an RLE4 stream for an image of the given size.
///
/// Only the magnitude of `height` matters. Once that many lines have been
/// closed the next record has to be [`Rle4Record::EndOfBitmap`]. This is what
/// tells a 1 pixel literal `(0, 1, ..)` apart from the final `(0, 1)`.
///
/// The iterator stops after [`Rle4Record::EndOfBitmap`] or the first error.
#[inline]
pub fn rle4_records(
  stream: &[u8], width: usize, height: i32,
) -> impl Iterator<Item = Result<Rle4Record<'_>, Rle4DecodeError>> + '_ {
  let mut rest = stream;
  let mut x = 0_usize;
  let mut lines_left = height.unsigned_abs() as usize;
  let mut done = false;
  core::iter::from_fn(move || {
    if done {
      return None;
    }
    let out = if lines_left == 0 {
      pull_end_of_bitmap(&mut rest)
    } else {
      pull_record(&mut rest, width, &mut x)?
    };
    if let Ok(Rle4Record::EndOfLine) = out {
      lines_left -= 1;
    }
    done = matches!(out, Err(_) | Ok(Rle4Record::EndOfBitmap));
    Some(out)
  })
}

#[inline]
fn set_pixel(line: &mut [u8], x: usize, value: u8) {
  if let Some(byte) = line.get_mut(x / 2) {
    if x % 2 == 0 {
      *byte = (*byte & 0b1111) | (value << 4);
    } else {
      *byte = (*byte & 0b1111_0000) | (value & 0b1111);
    }
  }
}

/// Decodes one line of an RLE4 stream, up to and including its end of line.
///
/// Gives the packed line (`ceil(width/2)` bytes, no 4-byte padding) and the
/// rest of the stream.
pub fn rle4_decode_line(stream: &[u8], width: usize) -> Result<(Vec<u8>, &[u8]), Rle4DecodeError> {
  let mut line = vec![0_u8; nibble_bytes_per_line(width)];
  let mut rest = stream;
  let mut x = 0_usize;
  loop {
    let start = x;
    match pull_record(&mut rest, width, &mut x) {
      None => return Err(Rle4DecodeError::UnexpectedEnd),
      Some(Err(e)) => return Err(e),
      Some(Ok(Rle4Record::EndOfLine)) => return Ok((line, rest)),
      Some(Ok(Rle4Record::EndOfBitmap)) => return Err(Rle4DecodeError::MissingEndOfLine),
      Some(Ok(Rle4Record::Run { count, index_h, index_l })) => {
        for i in 0..usize::from(count.get()) {
          set_pixel(&mut line, start + i, if i % 2 == 0 { index_h } else { index_l });
        }
      }
      Some(Ok(Rle4Record::Literal { count, packed })) => {
        let count = usize::from(count.get());
        for i in 0..count {
          set_pixel(&mut line, start + i, get_pixel(packed, i, count));
        }
      }
    }
  }
}

/// Decodes an RLE4 stream back into an uncompressed 4bpp pixel array.
///
/// Each output line is padded to a multiple of 4 bytes, the same layout that
/// [`rle4_encode_bitmap`] reads.
pub fn rle4_decode_bitmap(
  stream: &[u8], width: usize, height: i32,
) -> Result<Vec<u8>, Rle4DecodeError> {
  let line_count = height.unsigned_abs() as usize;
  let stride = padded_nibble_bytes_per_line(width);
  let mut out = vec![0_u8; line_count.saturating_mul(stride)];
  let mut rest = stream;
  for out_line in out.chunks_exact_mut(stride.max(1)).take(line_count) {
    let (line, tail) = rle4_decode_line(rest, width)?;
    out_line[..line.len()].copy_from_slice(&line);
    rest = tail;
  }
  if stride == 0 {
    // zero width: nothing was written, but every line still has an end of line.
    for _ in 0..line_count {
      let (_, tail) = rle4_decode_line(rest, width)?;
      rest = tail;
    }
  }
  pull_end_of_bitmap(&mut rest)?;
  Ok(out)
}
