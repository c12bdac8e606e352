use bytemuck::{pod_read_unaligned, Pod};
use core::mem::size_of;

/// Reads a `T` off the front of `bytes`, giving the value and the rest.
///
/// The read is unaligned, so `bytes` can start anywhere within a file.
#[inline]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Option<(T, &[u8])> {
  let position = size_of::<T>();
  if bytes.len() >= position {
    let (head, tail) = bytes.split_at(position);
    Some((pod_read_unaligned(head), tail))
  } else {
    None
  }
}

/// Splits off a `[u8; N]` from the front of `bytes`.
#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  try_pull_pod::<[u8; N]>(bytes)
}

/// Bytes per line of 4bpp pixels, without the 4-byte line padding.
#[inline]
#[must_use]
pub(crate) const fn nibble_bytes_per_line(width: usize) -> usize {
  width / 2 + (width % 2)
}

/// Bytes per line of 4bpp pixels, padded to a multiple of 4.
#[inline]
#[must_use]
pub(crate) const fn padded_nibble_bytes_per_line(width: usize) -> usize {
  let bytes_per_line = nibble_bytes_per_line(width);
  (bytes_per_line / 4 + (bytes_per_line % 4 != 0) as usize) * 4
}

#[test]
fn test_line_lengths() {
  for (w, unpadded, padded) in
    [(0, 0, 0), (1, 1, 4), (2, 1, 4), (7, 4, 4), (8, 4, 4), (9, 5, 8), (16, 8, 8)]
  {
    assert_eq!(nibble_bytes_per_line(w), unpadded, "width {w}");
    assert_eq!(padded_nibble_bytes_per_line(w), padded, "width {w}");
  }
}

#[test]
fn test_try_pull_pod() {
  let bytes = [1_u8, 2, 3, 4, 5];
  let (a, rest) = try_pull_byte_array::<2>(&bytes).unwrap();
  assert_eq!(a, [1, 2]);
  assert_eq!(rest, &[3, 4, 5]);
  assert!(try_pull_byte_array::<6>(&bytes).is_none());
}
