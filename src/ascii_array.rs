use core::fmt::Write;

/// An array of bytes expected to contain ascii data.
///
/// Nothing enforces the encoding. The `Debug` and `Display` impls just `as`
/// cast each byte into a `char`, which is exactly right for ascii and merely
/// odd looking for anything else.
///
/// Container formats open with magic byte sequences (the `"BM"` of a bitmap
/// file header), so wrapping them in this type gives the header structs a
/// readable `Debug` output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct AsciiArray<const N: usize>(pub [u8; N]);

// Safety: `repr(transparent)` over a byte array, so every bit pattern is valid
// and there's no padding.
unsafe impl<const N: usize> bytemuck::Zeroable for AsciiArray<N> {}
unsafe impl<const N: usize> bytemuck::Pod for AsciiArray<N> {}

impl<const N: usize> Default for AsciiArray<N> {
  #[inline]
  fn default() -> Self {
    Self([0; N])
  }
}

impl<const N: usize> core::fmt::Debug for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl<const N: usize> core::fmt::Display for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

impl<const N: usize> From<[u8; N]> for AsciiArray<N> {
  #[inline]
  fn from(array: [u8; N]) -> Self {
    Self(array)
  }
}

#[test]
fn test_ascii_array_formatting() {
  extern crate alloc;
  use alloc::format;

  let tag = AsciiArray(*b"BM");
  assert_eq!(format!("{tag}"), "BM");
  assert_eq!(format!("{tag:?}"), "\"BM\"");
  assert_eq!(AsciiArray::<2>::default(), AsciiArray([0, 0]));
}
