//! Text and JSON renderings handed to plotting and report collaborators.

use crate::physics::envelope::ResidualEnvelope;
use crate::physics::residual::{IntegratedField, ResidualField};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed-point value right-aligned in `width` characters, for report columns
/// such as supply currents.
pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!("{value:>width$.precision$}")
}

pub fn format_sci_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$e}", precision = precision)
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> Result<(), ExportError> {
    fs::write(path, normalize_text_artifact(content)).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Tab-separated table with a header line; every column must have the same
/// length.
pub fn render_series_table(columns: &[(&str, &[f64])]) -> Result<String, ExportError> {
    let rows = columns.first().map_or(0, |(_, values)| values.len());
    for (name, values) in columns {
        if values.len() != rows {
            return Err(ExportError::ColumnLength {
                column: (*name).to_string(),
                expected: rows,
                found: values.len(),
            });
        }
    }

    let mut table = columns
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("\t");
    table.push('\n');
    for row in 0..rows {
        let line = columns
            .iter()
            .map(|(_, values)| format_sci_f64(values[row], 9))
            .collect::<Vec<_>>()
            .join("\t");
        table.push_str(&line);
        table.push('\n');
    }
    Ok(table)
}

pub fn residual_table(pos: &[f64], residual: &ResidualField) -> Result<String, ExportError> {
    render_series_table(&[
        ("pos", pos),
        ("residual_normal", residual.normal.as_slice()),
        ("residual_skew", residual.skew.as_slice()),
    ])
}

pub fn integrated_field_table(pos: &[f64], field: &IntegratedField) -> Result<String, ExportError> {
    render_series_table(&[("pos", pos), ("by", field.by.as_slice()), ("bx", field.bx.as_slice())])
}

pub fn envelope_table(envelope: &ResidualEnvelope) -> Result<String, ExportError> {
    render_series_table(&[
        ("pos", envelope.positions.as_slice()),
        ("systematic", envelope.systematic.as_slice()),
        ("min", envelope.min.as_slice()),
        ("max", envelope.max.as_slice()),
    ])
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
