use super::*;
use bmp_rle4::{bmp::*, BmpRleError, FormatError};

/// Builds an uncompressed 4bpp file with the given pixel array.
fn make_bmp(width: i32, height: i32, pixels: &[u8]) -> Vec<u8> {
  let info = InfoHeader {
    size: 40,
    width,
    height,
    planes: 1,
    bits_per_pixel: 4,
    compression: 0,
    image_size: pixels.len() as u32,
    x_pels_per_meter: 3780,
    y_pels_per_meter: 3780,
    colors_used: 16,
    important_colors: 16,
  };
  let file = FileHeader {
    tag: BMP_TAG,
    total_size: (54 + 64 + pixels.len()) as u32,
    reserved1: 0,
    reserved2: 0,
    pixel_data_offset: 54 + 64,
  };
  let mut bytes = write_headers(&file, &info).to_vec();
  bytes.extend((0..16_u8).flat_map(|i| [i * 16, 255 - i * 16, i, 0]));
  bytes.extend_from_slice(pixels);
  bytes
}

#[test]
fn test_compress_random_file() {
  let (width, height) = (24, 10);
  let pixels = rand_runny_bytes(12 * height as usize);
  let bytes = make_bmp(width, height, &pixels);
  let (file_header, info_header) = parse_headers(&bytes).unwrap();
  assert_eq!(validate(&info_header), Ok(()));

  let (out, report) = compress_bmp_with_report(&bytes).unwrap();
  assert_eq!(report.original_size, bytes.len());
  assert_eq!(report.compressed_size, out.len());

  let (new_file, new_info) = parse_headers(&out).unwrap();
  let data = &out[118..];
  assert_eq!(new_info.compression, 2);
  assert_eq!(new_info.image_size as usize, data.len());
  assert_eq!(new_file.total_size as usize, out.len());
  assert_eq!(new_info, InfoHeader { compression: 2, image_size: data.len() as u32, ..info_header });
  assert_eq!(new_file, FileHeader { total_size: out.len() as u32, ..file_header });
  assert_eq!(&out[54..118], &bytes[54..118]);
  assert_eq!(rle4_decode_bitmap(data, 24, height).unwrap(), pixels);
}

#[test]
fn test_uniform_file_compresses_well() {
  let bytes = make_bmp(200, -50, &vec![0x99; 100 * 50]);
  let (out, report) = compress_bmp_with_report(&bytes).unwrap();
  // each line is (200, 0x99), (0, 0)
  assert_eq!(out.len(), 118 + 50 * 4 + 2);
  assert!(report.ratio_percent() > 90.0);
}

#[test]
fn test_gap_before_pixel_data_is_removed() {
  let mut bytes = make_bmp(8, 1, &[]);
  bytes.extend_from_slice(&[0xEE; 6]);
  bytes.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
  bytes[10..14].copy_from_slice(&124_u32.to_le_bytes());
  let compressed = compress_bmp(&bytes).unwrap();
  assert_eq!(compressed.file_header.pixel_data_offset, 118);
  assert_eq!(compressed.data, [0, 8, 0x12, 0x34, 0x56, 0x78, 0, 0, 0, 1]);
}

#[test]
fn test_rejected_files() {
  let good = make_bmp(8, 2, &[0; 8]);
  let format_err = |bytes: &[u8]| match compress_bmp(bytes) {
    Err(BmpRleError::Format(e)) => e,
    other => panic!("expected a format error, got {other:?}"),
  };

  assert_eq!(format_err(&good[..40]), FormatError::FileTooShort { len: 40 });

  let mut not_bm = good.clone();
  not_bm[..2].copy_from_slice(b"PT");
  assert_eq!(format_err(&not_bm), FormatError::BadSignature);

  let mut eight_bit = good.clone();
  eight_bit[28..30].copy_from_slice(&8_u16.to_le_bytes());
  assert_eq!(format_err(&eight_bit), FormatError::UnsupportedBitDepth { bits: 8 });

  let mut rle = good.clone();
  rle[30..34].copy_from_slice(&2_u32.to_le_bytes());
  assert_eq!(format_err(&rle), FormatError::AlreadyCompressed { compression: 2 });

  let narrow = make_bmp(6, 2, &[0; 8]);
  assert_eq!(format_err(&narrow), FormatError::MisalignedStride { stride: 3 });

  assert_eq!(format_err(&good[..100]), FormatError::TruncatedPalette);

  let mut far_offset = good.clone();
  far_offset[10..14].copy_from_slice(&500_u32.to_le_bytes());
  assert_eq!(
    format_err(&far_offset),
    FormatError::PixelDataOutOfBounds { offset: 500, len: good.len() }
  );

  // a tiny file that claims 2**31 lines
  let huge = make_bmp(8, i32::MIN, &[]);
  assert_eq!(
    format_err(&huge),
    FormatError::DimensionsTooLarge { width: 8, height: i32::MIN }
  );
  let huge_blank = make_bmp(0, i32::MIN, &[]);
  assert_eq!(
    format_err(&huge_blank),
    FormatError::DimensionsTooLarge { width: 0, height: i32::MIN }
  );
}

#[test]
fn test_error_messages_name_the_problem() {
  let msg = |e: FormatError| e.to_string();
  assert!(msg(FormatError::FileTooShort { len: 3 }).contains("too short"));
  assert!(msg(FormatError::BadSignature).contains("signature"));
  assert!(msg(FormatError::UnsupportedBitDepth { bits: 8 }).contains("bit depth"));
  assert!(msg(FormatError::AlreadyCompressed { compression: 1 }).contains("compress"));
  assert!(msg(FormatError::MisalignedStride { stride: 3 }).contains("alignment"));
  assert!(msg(FormatError::UnsupportedHeaderLayout { size: 12 }).contains("layout"));
  assert!(msg(FormatError::DimensionsTooLarge { width: 8, height: -9 }).contains("too large"));
}
