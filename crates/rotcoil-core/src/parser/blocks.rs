use crate::common::constants::{
    MM_PER_M, MULTIPOLE_BLOCK_MARKERS, N_COLUMNS, N_HARMONICS, RAW_CURVE_BLOCK_MARKERS,
};
use crate::domain::{MeasurementSource, ParserResult, RotcoilError};

#[derive(Debug, Clone, PartialEq)]
pub struct MultipoleBlock {
    /// The marker line itself; older software appended the main-coil
    /// orientation to it.
    pub marker_line: String,
    pub header: String,
    pub column_names: Vec<String>,
    /// Reference radius in meters, from `@<value>mm` in the header.
    pub reference_radius: Option<f64>,
    pub rows: [[f64; N_COLUMNS]; N_HARMONICS],
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveBlock {
    pub npoints: usize,
    pub ncurves: usize,
    /// Row-major samples, already multiplied by the unit factor.
    pub samples: Vec<f64>,
}

pub fn locate_marker(lines: &[&str], markers: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| markers.iter().any(|marker| line.contains(marker)))
}

pub fn parse_multipole_block(
    lines: &[&str],
    source: &MeasurementSource,
) -> ParserResult<MultipoleBlock> {
    let marker_index = locate_marker(lines, &MULTIPOLE_BLOCK_MARKERS).ok_or_else(|| {
        RotcoilError::input_validation(
            "INPUT.MULTIPOLE_BLOCK",
            format!(
                "{} has no multipole block (expected a '{}' line)",
                source, MULTIPOLE_BLOCK_MARKERS[0]
            ),
        )
    })?;

    let header_index = marker_index + 1;
    let header = lines.get(header_index).copied().ok_or_else(|| {
        RotcoilError::input_validation(
            "INPUT.MULTIPOLE_HEADER",
            format!(
                "{} multipole block at line {} has no column header",
                source,
                marker_index + 1
            ),
        )
    })?;

    let mut rows = [[0.0; N_COLUMNS]; N_HARMONICS];
    for (harmonic_index, row) in rows.iter_mut().enumerate() {
        let line_index = header_index + 1 + harmonic_index;
        let line = lines.get(line_index).copied().ok_or_else(|| {
            RotcoilError::input_validation(
                "INPUT.MULTIPOLE_ROWS",
                format!(
                    "{} multipole block ends after {} of {} harmonic rows",
                    source, harmonic_index, N_HARMONICS
                ),
            )
        })?;
        *row = parse_multipole_row(line).map_err(|detail| {
            RotcoilError::input_validation(
                "INPUT.MULTIPOLE_ROW",
                format!(
                    "{} multipole row for harmonic {} (line {}): {}",
                    source,
                    harmonic_index + 1,
                    line_index + 1,
                    detail
                ),
            )
        })?;
    }

    Ok(MultipoleBlock {
        marker_line: lines[marker_index].trim().to_string(),
        header: header.trim_end().to_string(),
        column_names: header
            .trim_end()
            .split('\t')
            .map(|name| name.trim().to_string())
            .collect(),
        reference_radius: parse_reference_radius(header),
        rows,
    })
}

/// Cells are positional: only trailing empty cells are ignored, an empty
/// cell inside the first thirteen is an error.
fn parse_multipole_row(line: &str) -> Result<[f64; N_COLUMNS], String> {
    let mut tokens: Vec<&str> = line.trim_end().split('\t').map(str::trim).collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    if tokens.len() < N_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            N_COLUMNS,
            tokens.len()
        ));
    }

    let mut row = [0.0; N_COLUMNS];
    for (column, token) in tokens.iter().take(N_COLUMNS).enumerate() {
        if token.is_empty() {
            return Err(format!("column {} is empty", column + 1));
        }
        row[column] = token
            .parse::<f64>()
            .map_err(|_| format!("column {} value '{}' is not a number", column + 1, token))?;
    }
    Ok(row)
}

/// Reference radius embedded in a column header as `@<value>mm`, in meters.
pub fn parse_reference_radius(header: &str) -> Option<f64> {
    let after_at = &header[header.find('@')? + 1..];
    let millimeters = after_at[..after_at.find("mm")?].trim();
    millimeters
        .parse::<f64>()
        .ok()
        .map(|value| value / MM_PER_M)
}

pub fn parse_curve_block(
    lines: &[&str],
    unit_factor: f64,
    source: &MeasurementSource,
) -> ParserResult<CurveBlock> {
    let marker_index = locate_marker(lines, &RAW_CURVE_BLOCK_MARKERS).ok_or_else(|| {
        RotcoilError::input_validation(
            "INPUT.RAW_CURVE_BLOCK",
            format!(
                "{} has no raw-curve block (expected a '{}' line)",
                source, RAW_CURVE_BLOCK_MARKERS[0]
            ),
        )
    })?;

    let mut samples = Vec::new();
    let mut npoints = 0;
    let mut ncurves = None;
    for (offset, line) in lines[marker_index + 1..].iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let line_number = marker_index + offset + 2;
        let values = trimmed
            .split('\t')
            .skip(1)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    RotcoilError::input_validation(
                        "INPUT.RAW_CURVE_VALUE",
                        format!(
                            "{} raw-curve line {} value '{}' is not a number",
                            source, line_number, token
                        ),
                    )
                })
            })
            .collect::<ParserResult<Vec<f64>>>()?;

        match ncurves {
            None => ncurves = Some(values.len()),
            Some(expected) if expected != values.len() => {
                return Err(RotcoilError::input_validation(
                    "INPUT.RAW_CURVE_SHAPE",
                    format!(
                        "{} raw-curve line {} has {} curves, expected {}",
                        source,
                        line_number,
                        values.len(),
                        expected
                    ),
                ));
            }
            Some(_) => {}
        }

        samples.extend(values.into_iter().map(|value| value * unit_factor));
        npoints += 1;
    }

    Ok(CurveBlock {
        npoints,
        ncurves: ncurves.unwrap_or(0),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_curve_block, parse_multipole_block, parse_reference_radius};
    use crate::domain::MeasurementSource;

    fn source() -> MeasurementSource {
        MeasurementSource::Memory("unit".to_string())
    }

    fn harmonic_row(harmonic: usize, roll: f64) -> String {
        let mut values = vec![0.0; 13];
        values[0] = harmonic as f64;
        values[1] = 0.5 / harmonic as f64;
        values[5] = roll;
        values
            .iter()
            .map(|value| format!("{:e}", value))
            .collect::<Vec<_>>()
            .join("\t")
    }

    #[test]
    fn reference_radius_is_read_in_millimeters() {
        assert_eq!(
            parse_reference_radius("n\tNormal @12.0mm (T.m^(n-1))\tSkew"),
            Some(0.012)
        );
        assert_eq!(parse_reference_radius("n\t@ 17.5 mm"), Some(0.0175));
        assert_eq!(parse_reference_radius("n\tNormal\tSkew"), None);
        assert_eq!(parse_reference_radius("n\t@abcmm"), None);
    }

    #[test]
    fn multipole_block_reads_fifteen_rows_after_header() {
        let mut owned = vec![
            "main_coil_current_avg\t1.0".to_string(),
            "##### Reading Data #####".to_string(),
            "n\tNormal @17.5mm\tNormal error".to_string(),
        ];
        owned.extend((1..=15).map(|harmonic| harmonic_row(harmonic, if harmonic == 3 { 0.002 } else { 0.0 })));
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();

        let block = parse_multipole_block(&lines, &source()).expect("block should parse");
        assert_eq!(block.reference_radius, Some(0.0175));
        assert_eq!(block.column_names, vec!["n", "Normal @17.5mm", "Normal error"]);
        assert_eq!(block.rows[2][5], 0.002);
        assert_eq!(block.rows[14][0], 15.0);
        assert_eq!(block.marker_line, "##### Reading Data #####");
    }

    #[test]
    fn portuguese_marker_is_accepted() {
        let mut owned = vec!["Dados de Leitura".to_string(), "n\t@12mm".to_string()];
        owned.extend((1..=15).map(|harmonic| harmonic_row(harmonic, 0.0)));
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();

        assert!(parse_multipole_block(&lines, &source()).is_ok());
    }

    #[test]
    fn truncated_multipole_block_is_fatal() {
        let mut owned = vec!["Reading Data".to_string(), "n\t@12mm".to_string()];
        owned.extend((1..=10).map(|harmonic| harmonic_row(harmonic, 0.0)));
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();

        let error = parse_multipole_block(&lines, &source()).expect_err("rows are missing");
        assert_eq!(error.placeholder(), "INPUT.MULTIPOLE_ROWS");
    }

    #[test]
    fn non_numeric_multipole_value_is_fatal() {
        let mut owned = vec!["Reading Data".to_string(), "n\t@12mm".to_string()];
        owned.extend((1..=15).map(|harmonic| harmonic_row(harmonic, 0.0)));
        owned[5] = owned[5].replacen("0e0", "abc", 1);
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();

        let error = parse_multipole_block(&lines, &source()).expect_err("bad value");
        assert_eq!(error.placeholder(), "INPUT.MULTIPOLE_ROW");
        assert!(error.message().contains("harmonic 4"));
    }

    #[test]
    fn empty_cell_does_not_shift_later_columns() {
        let mut owned = vec!["Reading Data".to_string(), "n\t@12mm".to_string()];
        owned.extend((1..=15).map(|harmonic| harmonic_row(harmonic, 0.0)));
        let cells: Vec<String> = (1..=13).map(|column| column.to_string()).collect();
        owned[3] = format!("2\t\t{}\t99", cells[2..].join("\t"));
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();

        let error = parse_multipole_block(&lines, &source()).expect_err("empty cell");
        assert_eq!(error.placeholder(), "INPUT.MULTIPOLE_ROW");
        assert!(error.message().contains("harmonic 2"));
        assert!(error.message().contains("column 2 is empty"));
    }

    #[test]
    fn trailing_tabs_after_a_full_row_are_ignored() {
        let mut owned = vec!["Reading Data".to_string(), "n\t@12mm".to_string()];
        owned.extend((1..=15).map(|harmonic| format!("{}\t\t\r", harmonic_row(harmonic, 0.0))));
        let lines: Vec<&str> = owned.iter().map(String::as_str).collect();

        let block = parse_multipole_block(&lines, &source()).expect("trailing tabs are padding");
        assert_eq!(block.rows[1][1], 0.25);
    }

    #[test]
    fn curve_block_drops_index_column_and_scales() {
        let lines = [
            "Raw Data Stored",
            "1\t2.0\t4.0",
            "",
            "2\t6.0\t8.0\t",
        ];

        let block = parse_curve_block(&lines, 0.5, &source()).expect("curves should parse");
        assert_eq!(block.npoints, 2);
        assert_eq!(block.ncurves, 2);
        assert_eq!(block.samples, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn ragged_curve_block_is_fatal() {
        let lines = ["Dados Brutos", "1\t2.0\t4.0", "2\t6.0"];
        let error = parse_curve_block(&lines, 1.0, &source()).expect_err("ragged rows");
        assert_eq!(error.placeholder(), "INPUT.RAW_CURVE_SHAPE");
    }

    #[test]
    fn missing_curve_block_is_fatal() {
        let lines = ["main_coil_current_avg\t1.0"];
        let error = parse_curve_block(&lines, 1.0, &source()).expect_err("no block");
        assert_eq!(error.placeholder(), "INPUT.RAW_CURVE_BLOCK");
        assert!(error.message().contains("'unit'"));
    }
}
