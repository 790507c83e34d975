//! Parsed rotating-coil measurements.
//!
//! Construction is a linear pipeline over the raw line array: scalar header
//! fields, the multipole block, the raw-curve block, then the derived main
//! harmonic, magnet model, magnetic center and roll. Files and store rows
//! go through the same pipeline.

mod model;
mod parser;

pub use model::{MeasurementRecord, MeasurementScalars};
pub use parser::normalize_magnet_name;

use crate::domain::{MeasurementSource, ParserResult, RotcoilResult};
use crate::store::{MeasurementRow, MeasurementStore};

impl MeasurementRecord {
    pub fn from_row(row: &MeasurementRow) -> ParserResult<Self> {
        let owned = row.to_lines();
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();
        Self::from_lines(&lines, MeasurementSource::StoreRow(row.id))
    }

    pub fn from_store<S: MeasurementStore + ?Sized>(store: &S, id: i64) -> RotcoilResult<Self> {
        let row = store.fetch_row(id)?;
        Self::from_row(&row)
    }
}
