use super::*;
use bmp_rle4::{byte_rle::*, HexError};
use ByteRleProfile::*;

const LAB_INPUT: &str = "0000000000000111111111111111111111FFFFFFA0000A12DDDB1B1B1B1B1B1BC1C0";

#[test]
fn test_random_bytes_round_trip() {
  for count in [0, 1, 2, 63, 64, 65, 127, 1000, 4096] {
    for make in [rand_bytes, rand_runny_bytes] {
      let data = make(count);
      for profile in [Biased, Direct] {
        let encoded = byte_rle_encode(&data, profile);
        assert_eq!(byte_rle_decode(&encoded, profile), data, "{profile:?}, {count} bytes");
      }
    }
  }
}

#[test]
fn test_high_bytes_round_trip() {
  // every byte from the control range, alone and in runs
  let data: Vec<u8> = (0xC0..=0xFF_u8).flat_map(|b| [b, 0x01, b, b]).collect();
  for profile in [Biased, Direct] {
    let encoded = byte_rle_encode(&data, profile);
    assert_eq!(byte_rle_decode(&encoded, profile), data, "{profile:?}");
  }
}

#[test]
fn test_lab_input() {
  assert_eq!(
    byte_rle_encode_hex(LAB_INPUT, Biased).unwrap(),
    "C50001C911C2FFA0000A12C0DDC0DBC51BC0C1C0C0"
  );
  assert_eq!(
    byte_rle_encode_hex(LAB_INPUT, Direct).unwrap(),
    "C60001CA11C3FFA0000A12C1DDC1DBC61BC1C1C1C0"
  );
  for profile in [Biased, Direct] {
    let packed = byte_rle_encode_hex(LAB_INPUT, profile).unwrap();
    assert_eq!(byte_rle_decode_hex(&packed, profile).unwrap(), LAB_INPUT);
  }
}

#[test]
fn test_decode_lab_stream() {
  let packed = "25369568C426B3A7C9EFD196";
  assert_eq!(
    byte_rle_decode_hex(packed, Biased).unwrap(),
    format!("25369568{}B3A7{}{}", "26".repeat(5), "EF".repeat(10), "96".repeat(18))
  );
  assert_eq!(
    byte_rle_decode_hex(packed, Direct).unwrap(),
    format!("25369568{}B3A7{}{}", "26".repeat(4), "EF".repeat(9), "96".repeat(17))
  );
}

#[test]
fn test_runs_never_exceed_63() {
  let data = vec![0x42; 200];
  for profile in [Biased, Direct] {
    let encoded = byte_rle_encode(&data, profile);
    // 63 + 63 + 63 + 11
    assert_eq!(encoded.len(), 8);
    for pair in encoded.chunks_exact(2) {
      assert!(profile.run_length(pair[0]) <= MAX_BYTE_RUN);
      assert_eq!(pair[1], 0x42);
    }
    assert_eq!(byte_rle_decode(&encoded, profile), data);
  }
}

#[test]
fn test_bad_hex_is_an_error() {
  assert_eq!(byte_rle_encode_hex("ABC", Biased), Err(HexError::OddLength));
  assert_eq!(byte_rle_decode_hex("zz", Direct), Err(HexError::InvalidDigit { index: 0 }));
}
