//! Measurements kept as rows of an external table store.
//!
//! A row mirrors the file header one column per tag and keeps the two data
//! blocks as text blobs. Rebuilding the line array from a row lets the file
//! parser handle both sources.

use crate::common::constants::{MULTIPOLE_BLOCK_MARKERS, RAW_CURVE_BLOCK_MARKERS};
use crate::domain::{RotcoilError, RotcoilResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub id: i64,
    /// `(tag, value)` pairs in column order.
    pub fields: Vec<(String, String)>,
    /// Column header line followed by the 15 harmonic rows.
    pub multipoles: String,
    /// Raw-curve sample lines, index column included.
    pub curves: String,
}

impl MeasurementRow {
    pub fn field(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == tag)
            .map(|(_, value)| value.as_str())
    }

    /// Tagged-text lines equivalent to a measurement file.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .fields
            .iter()
            .map(|(tag, value)| format!("{}\t{}", tag, value))
            .collect();
        lines.push(MULTIPOLE_BLOCK_MARKERS[0].to_string());
        lines.extend(self.multipoles.lines().map(str::to_string));
        lines.push(RAW_CURVE_BLOCK_MARKERS[0].to_string());
        lines.extend(self.curves.lines().map(str::to_string));
        lines
    }
}

/// Read access to stored measurements.
pub trait MeasurementStore {
    fn fetch_row(&self, id: i64) -> RotcoilResult<MeasurementRow>;
}

/// Rows held in memory, typically loaded from a JSON dump of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStore {
    rows: BTreeMap<i64, MeasurementRow>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row, returning the one it replaced.
    pub fn insert(&mut self, row: MeasurementRow) -> Option<MeasurementRow> {
        self.rows.insert(row.id, row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.keys().copied()
    }

    /// Loads a JSON array of rows.
    pub fn from_json(text: &str) -> RotcoilResult<Self> {
        let rows: Vec<MeasurementRow> = serde_json::from_str(text).map_err(|source| {
            RotcoilError::input_validation(
                "INPUT.STORE_JSON",
                format!("measurement rows are not valid JSON: {}", source),
            )
        })?;

        let mut store = Self::new();
        for row in rows {
            let id = row.id;
            if store.insert(row).is_some() {
                return Err(RotcoilError::input_validation(
                    "INPUT.STORE_DUPLICATE_ROW",
                    format!("row {} appears more than once", id),
                ));
            }
        }
        Ok(store)
    }
}

impl MeasurementStore for InMemoryStore {
    fn fetch_row(&self, id: i64) -> RotcoilResult<MeasurementRow> {
        self.rows.get(&id).cloned().ok_or_else(|| {
            RotcoilError::input_validation("INPUT.STORE_ROW", format!("row {} does not exist", id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryStore, MeasurementRow, MeasurementStore};

    fn row(id: i64) -> MeasurementRow {
        MeasurementRow {
            id,
            fields: vec![
                ("magnet_name".to_string(), "BQF-001".to_string()),
                ("main_coil_current_avg".to_string(), "120.0".to_string()),
            ],
            multipoles: "n\tNormal @17.5mm\n1\t0.0".to_string(),
            curves: "1\t0.5\n2\t0.6\n".to_string(),
        }
    }

    #[test]
    fn row_lines_rebuild_tagged_file_layout() {
        let lines = row(7).to_lines();
        assert_eq!(
            lines,
            vec![
                "magnet_name\tBQF-001",
                "main_coil_current_avg\t120.0",
                "Reading Data",
                "n\tNormal @17.5mm",
                "1\t0.0",
                "Raw Data Stored",
                "1\t0.5",
                "2\t0.6",
            ]
        );
        assert_eq!(row(7).field("magnet_name"), Some("BQF-001"));
        assert_eq!(row(7).field("hour"), None);
    }

    #[test]
    fn missing_row_is_reported_by_id() {
        let mut store = InMemoryStore::new();
        assert!(store.insert(row(1)).is_none());
        assert_eq!(store.fetch_row(1), Ok(row(1)));

        let error = store.fetch_row(2).expect_err("row 2 is absent");
        assert_eq!(error.placeholder(), "INPUT.STORE_ROW");
        assert!(error.message().contains("row 2"));
    }

    #[test]
    fn json_dump_loads_rows() {
        let text = serde_json::to_string(&vec![row(3), row(5)]).expect("rows serialize");
        let store = InMemoryStore::from_json(&text).expect("rows load");
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![3, 5]);
        assert_eq!(store.len(), 2);

        let duplicated = serde_json::to_string(&vec![row(3), row(3)]).expect("rows serialize");
        let error = InMemoryStore::from_json(&duplicated).expect_err("duplicate ids");
        assert_eq!(error.placeholder(), "INPUT.STORE_DUPLICATE_ROW");

        let error = InMemoryStore::from_json("{").expect_err("bad json");
        assert_eq!(error.placeholder(), "INPUT.STORE_JSON");
    }
}
