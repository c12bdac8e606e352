use super::*;
use bmp_rle4::bmp::*;

/// Clears the low nibble of the last byte when the width is odd, since that
/// nibble isn't a pixel and always decodes as 0.
fn clear_unused_nibble(line: &mut [u8], width: usize) {
  if width % 2 == 1 {
    if let Some(last) = line.last_mut() {
      *last &= 0b1111_0000;
    }
  }
}

fn encode_line(line: &[u8], width: usize) -> Vec<u8> {
  let mut out = Vec::new();
  rle4_encode_line(line, width, &mut out);
  out
}

#[test]
fn test_uniform_line_of_four() {
  assert_eq!(encode_line(&[0x55, 0x55], 4), [4, 0x55, 0, 0]);
  assert_eq!(rle4_encode_bitmap(&[0x55, 0x55, 0, 0], 4, 1), [4, 0x55, 0, 0, 0, 1]);
}

#[test]
fn test_uniform_lines_are_one_run() {
  for width in 2..=255_usize {
    for pixel in [0_u8, 7, 15] {
      let line = vec![pixel * 0x11; (width + 1) / 2];
      let encoded = encode_line(&line, width);
      assert_eq!(encoded, [width as u8, pixel * 0x11, 0, 0], "width {width}");
    }
  }
}

#[test]
fn test_no_repeats_means_only_literals() {
  for width in 1..=600_usize {
    // 0, 1, 2, .. 15, 0, 1, .. never has two equal neighbors
    let line: Vec<u8> = (0..(width + 1) / 2)
      .map(|i| {
        let hi = ((2 * i) % 16) as u8;
        let lo = if 2 * i + 1 < width { ((2 * i + 1) % 16) as u8 } else { 0 };
        (hi << 4) | lo
      })
      .collect();
    let encoded = encode_line(&line, width);
    let mut pixels = 0;
    for record in rle4_records(&encoded, width, 1) {
      match record.unwrap() {
        Rle4Record::Literal { count, .. } => pixels += usize::from(count.get()),
        Rle4Record::EndOfLine => break,
        other => panic!("width {width}: unexpected {other:?}"),
      }
    }
    assert_eq!(pixels, width);
  }
}

#[test]
fn test_random_lines_round_trip() {
  for width in (0..=64).chain([255, 256, 257, 509, 510, 511, 1000]) {
    for make in [rand_bytes, rand_runny_bytes] {
      let mut line = make((width + 1) / 2);
      clear_unused_nibble(&mut line, width);
      let encoded = encode_line(&line, width);
      let (decoded, rest) = rle4_decode_line(&encoded, width).unwrap();
      assert_eq!(decoded, line, "width {width}, encoded {encoded:?}");
      assert!(rest.is_empty());
      // every record keeps the stream in 2 byte steps
      assert_eq!(encoded.len() % 2, 0);
    }
  }
}

#[test]
fn test_random_bitmaps_round_trip() {
  for (width, height) in [(1_usize, 1_i32), (3, 5), (8, -4), (13, 7), (64, -9), (300, 3)] {
    let stride = ((width + 1) / 2 + 3) / 4 * 4;
    let mut pixels = rand_runny_bytes(stride * height.unsigned_abs() as usize);
    for line in pixels.chunks_exact_mut(stride) {
      let used = (width + 1) / 2;
      line[used..].fill(0);
      clear_unused_nibble(&mut line[..used], width);
    }
    let encoded = rle4_encode_bitmap(&pixels, width, height);
    assert_eq!(&encoded[encoded.len() - 2..], RLE4_END_OF_BITMAP);
    let decoded = rle4_decode_bitmap(&encoded, width, height).unwrap();
    assert_eq!(decoded, pixels, "{width}x{height}");
  }
}

#[test]
fn test_records_of_random_bitmaps() {
  for (width, height) in [(1_usize, 2_i32), (1, -7), (2, 3), (6, -5), (33, 4), (600, 2)] {
    let stride = ((width + 1) / 2 + 3) / 4 * 4;
    let line_count = height.unsigned_abs() as usize;
    for make in [rand_bytes, rand_runny_bytes] {
      let encoded = rle4_encode_bitmap(&make(stride * line_count), width, height);
      let records: Vec<Rle4Record> =
        rle4_records(&encoded, width, height).collect::<Result<_, _>>().unwrap();
      assert_eq!(records.last(), Some(&Rle4Record::EndOfBitmap), "{width}x{height}");
      let lines = records.iter().filter(|r| **r == Rle4Record::EndOfLine).count();
      assert_eq!(lines, line_count, "{width}x{height}");
      let pixels: usize = records
        .iter()
        .map(|r| match r {
          Rle4Record::Run { count, .. } | Rle4Record::Literal { count, .. } => {
            usize::from(count.get())
          }
          _ => 0,
        })
        .sum();
      assert_eq!(pixels, width * line_count, "{width}x{height}");
    }
  }
}

#[test]
fn test_short_pixel_data_is_zero_padded() {
  // 2 lines of 8 pixels need 8 bytes, only 5 are given.
  let encoded = rle4_encode_bitmap(&[0x11, 0x11, 0x11, 0x11, 0x22], 8, 2);
  assert_eq!(encoded, [8, 0x11, 0, 0, 2, 0x22, 6, 0x00, 0, 0, 0, 1]);
}

#[test]
fn test_zero_size_bitmaps() {
  assert_eq!(rle4_encode_bitmap(&[], 8, 0), RLE4_END_OF_BITMAP);
  assert_eq!(rle4_encode_bitmap(&[], 0, 2), [0, 0, 0, 0, 0, 1]);
  assert_eq!(rle4_decode_bitmap(&[0, 0, 0, 0, 0, 1], 0, 2), Ok(Vec::new()));
}
