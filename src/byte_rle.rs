//! A simple run-length encoding over plain bytes.
//!
//! Bytes from `0xC0` up are control bytes: the low bits give a repeat count,
//! and the byte after the control byte is the value to repeat. Other bytes
//! stand for themselves. A lone data byte that's `0xC0` or more would be read
//! as a control byte, so it's escaped as a run of length 1.
//!
//! Runs are at most 63 bytes long. How the length maps to the control byte
//! depends on the [`ByteRleProfile`].

use crate::{error::HexError, hex::*};
use alloc::{string::String, vec::Vec};

/// Bytes at or above this are control bytes.
pub const CONTROL_BASE: u8 = 0xC0;

/// The longest run a single control byte can describe.
pub const MAX_BYTE_RUN: usize = 63;

/// The control byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteRleProfile {
  /// The control byte is `0xC0 + (len - 1)`, so a run of 1 is `0xC0` and a
  /// run of 63 is `0xFE`.
  #[default]
  Biased,
  /// The control byte is `0xC0 + len`, so a run of 1 is `0xC1` and a run of
  /// 63 is `0xFF`. A `0xC0` control byte repeats its data byte 0 times.
  ///
  /// This is the profile where `C1 C0` packs to `C1 C1 C1 C0`. The default
  /// [`Biased`](Self::Biased) profile packs it to `C0 C1 C0 C0` instead.
  Direct,
}
impl ByteRleProfile {
  /// The control byte for a run of `len` bytes (`1..=63`).
  #[inline]
  #[must_use]
  pub const fn control_byte(self, len: usize) -> u8 {
    let len = len as u8;
    match self {
      Self::Biased => CONTROL_BASE + (len - 1),
      Self::Direct => CONTROL_BASE + len,
    }
  }

  /// How many times a control byte repeats its data byte.
  #[inline]
  #[must_use]
  pub const fn run_length(self, control: u8) -> usize {
    let low = (control - CONTROL_BASE) as usize;
    match self {
      Self::Biased => low + 1,
      Self::Direct => low,
    }
  }
}

/// Run-length encodes `data`.
pub fn byte_rle_encode(data: &[u8], profile: ByteRleProfile) -> Vec<u8> {
  let mut out = Vec::with_capacity(data.len());
  let mut rest = data;
  while let [first, ..] = rest {
    let len = rest.iter().take(MAX_BYTE_RUN).take_while(|&b| b == first).count();
    if len >= 2 || *first >= CONTROL_BASE {
      out.extend_from_slice(&[profile.control_byte(len), *first]);
    } else {
      out.push(*first);
    }
    rest = &rest[len..];
  }
  out
}

/// Decodes run-length encoded `data`.
///
/// A control byte at the very end, with no data byte after it, is dropped.
pub fn byte_rle_decode(data: &[u8], profile: ByteRleProfile) -> Vec<u8> {
  let mut out = Vec::with_capacity(data.len());
  let mut it = data.iter().copied();
  while let Some(b) = it.next() {
    if b < CONTROL_BASE {
      out.push(b);
      continue;
    }
    match it.next() {
      Some(value) => out.extend(core::iter::repeat(value).take(profile.run_length(b))),
      None => log::debug!("dropping trailing control byte {b:#04X}"),
    }
  }
  out
}

/// [`byte_rle_encode`] with hex strings in and out.
pub fn byte_rle_encode_hex(hex: &str, profile: ByteRleProfile) -> Result<String, HexError> {
  Ok(to_hex(&byte_rle_encode(&parse_hex(hex)?, profile)))
}

/// [`byte_rle_decode`] with hex strings in and out.
pub fn byte_rle_decode_hex(hex: &str, profile: ByteRleProfile) -> Result<String, HexError> {
  Ok(to_hex(&byte_rle_decode(&parse_hex(hex)?, profile)))
}
