use bmp_rle4::{bmp::compress_bmp_with_report, byte_rle::*};

use std::{path::Path, process::ExitCode};

const USAGE: &str = "\
usage:
  bmp-rle4 compress <input.bmp> <output.bmp>
  bmp-rle4 pack <HEX> [--direct]
  bmp-rle4 unpack <HEX> [--direct]

Set RUST_LOG=debug (or trace) for more detail.";

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    .format_timestamp(None)
    .init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let args: Vec<&str> = args.iter().map(String::as_str).collect();
  let result = match args.as_slice() {
    ["compress", input, output] => compress_file(Path::new(input), Path::new(output)),
    ["pack", hex, flags @ ..] => {
      profile_from_flags(flags).and_then(|profile| run_hex(byte_rle_encode_hex, hex, profile))
    }
    ["unpack", hex, flags @ ..] => {
      profile_from_flags(flags).and_then(|profile| run_hex(byte_rle_decode_hex, hex, profile))
    }
    _ => Err(USAGE.to_string()),
  };
  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(msg) => {
      eprintln!("error: {msg}");
      ExitCode::FAILURE
    }
  }
}

fn profile_from_flags(flags: &[&str]) -> Result<ByteRleProfile, String> {
  match flags {
    [] => Ok(ByteRleProfile::Biased),
    ["--direct"] => Ok(ByteRleProfile::Direct),
    _ => Err(USAGE.to_string()),
  }
}

fn run_hex(
  op: fn(&str, ByteRleProfile) -> Result<String, bmp_rle4::HexError>, hex: &str,
  profile: ByteRleProfile,
) -> Result<(), String> {
  let out = op(hex, profile).map_err(|e| e.to_string())?;
  println!("{out}");
  Ok(())
}

fn compress_file(input: &Path, output: &Path) -> Result<(), String> {
  let bytes = std::fs::read(input)
    .map_err(|e| format!("can't read `{}`: {e}", input.display()))?;
  let (out, report) = compress_bmp_with_report(&bytes).map_err(|e| e.to_string())?;
  std::fs::write(output, &out)
    .map_err(|e| format!("can't write `{}`: {e}", output.display()))?;

  println!("original size:   {} bytes", report.original_size);
  println!("compressed size: {} bytes", report.compressed_size);
  println!("saved:           {:.1}%", report.ratio_percent());
  println!("wrote `{}`", output.display());
  Ok(())
}
