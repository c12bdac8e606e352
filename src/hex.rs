//! Bytes written as pairs of hex digits, `"C1C0"` for `[0xC1, 0xC0]`.

use crate::error::HexError;
use alloc::{string::String, vec::Vec};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[inline]
const fn hex_value(digit: u8) -> Option<u8> {
  match digit {
    b'0'..=b'9' => Some(digit - b'0'),
    b'A'..=b'F' => Some(digit - b'A' + 10),
    b'a'..=b'f' => Some(digit - b'a' + 10),
    _ => None,
  }
}

/// Parses a string of hex digit pairs, without separators.
///
/// Both upper and lower case digits are accepted.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, HexError> {
  let digits = s.as_bytes();
  if digits.len() % 2 != 0 {
    return Err(HexError::OddLength);
  }
  digits
    .chunks_exact(2)
    .enumerate()
    .map(|(i, pair)| {
      let hi = hex_value(pair[0]).ok_or(HexError::InvalidDigit { index: i * 2 })?;
      let lo = hex_value(pair[1]).ok_or(HexError::InvalidDigit { index: i * 2 + 1 })?;
      Ok((hi << 4) | lo)
    })
    .collect()
}

/// Writes bytes as upper case hex digit pairs.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
  let mut s = String::with_capacity(bytes.len() * 2);
  for &b in bytes {
    s.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
    s.push(char::from(HEX_DIGITS[usize::from(b & 0b1111)]));
  }
  s
}

#[test]
fn test_hex() {
  assert_eq!(parse_hex("00C1c0Ff"), Ok(alloc::vec![0x00, 0xC1, 0xC0, 0xFF]));
  assert_eq!(to_hex(&[0x00, 0xC1, 0xC0, 0xFF]), "00C1C0FF");
  assert_eq!(parse_hex(""), Ok(Vec::new()));
  assert_eq!(parse_hex("ABC"), Err(HexError::OddLength));
  assert_eq!(parse_hex("A0G1"), Err(HexError::InvalidDigit { index: 2 }));
  assert_eq!(parse_hex("A0 1"), Err(HexError::InvalidDigit { index: 2 }));
}
