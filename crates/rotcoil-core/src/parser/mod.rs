//! Tagged-text measurement parsing: Latin-1 source decoding, the header
//! tag scanner and the fixed-layout multipole/raw-curve blocks.

pub mod blocks;
pub mod scanner;

pub use blocks::{CurveBlock, MultipoleBlock, parse_curve_block, parse_multipole_block};
pub use scanner::{TagValue, find, find_field, find_tagged_line};

use crate::domain::{ParserResult, RotcoilError};
use std::fs;
use std::path::Path;

/// Bench files are Latin-1; every byte maps to the code point of the same
/// value, so decoding cannot fail.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

pub fn read_measurement_text(path: &Path) -> ParserResult<String> {
    let bytes = fs::read(path).map_err(|source| {
        RotcoilError::io_system(
            "IO.MEASUREMENT_READ",
            format!("failed to read measurement '{}': {}", path.display(), source),
        )
    })?;

    let text = decode_latin1(&bytes);
    if text.trim().is_empty() {
        return Err(RotcoilError::input_validation(
            "INPUT.EMPTY_MEASUREMENT",
            format!("measurement '{}' is empty", path.display()),
        ));
    }
    Ok(text)
}

pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
