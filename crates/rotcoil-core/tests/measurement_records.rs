use chrono::NaiveDate;
use rotcoil_core::common::tags::{ALL_FIELDS, COMMENTS, MAIN_COIL_CURRENT_AVG};
use rotcoil_core::domain::{MagnetModel, MeasurementSource};
use rotcoil_core::measurement::MeasurementRecord;
use rotcoil_core::multipoles::MultipoleColumn;
use rotcoil_core::store::{InMemoryStore, MeasurementRow};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

const HEADER: &str = "n\tNormal @12mm\tNormal Err\tSkew\tSkew Err\tRoll\tRoll Err\t\
                      Normal/Main\tNormal/Main Err\tSkew/Main\tSkew/Main Err\t\
                      Magnitude/Main\tMagnitude/Main Err";

/// Fifteen harmonic rows with `entries` as `(harmonic, column, value)`.
fn harmonic_rows(entries: &[(usize, usize, f64)]) -> Vec<String> {
    (1..=15)
        .map(|harmonic| {
            let mut row = vec![0.0; 13];
            row[0] = harmonic as f64;
            for &(entry_harmonic, column, value) in entries {
                if entry_harmonic == harmonic {
                    row[column] = value;
                }
            }
            row.iter()
                .map(|value| format!("{value:e}"))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect()
}

fn measurement_text(tags: &[(&str, &str)], entries: &[(usize, usize, f64)]) -> String {
    let mut lines: Vec<String> = tags
        .iter()
        .map(|(tag, value)| format!("{tag}\t{value}"))
        .collect();
    lines.push("Reading Data".to_string());
    lines.push(HEADER.to_string());
    lines.extend(harmonic_rows(entries));
    lines.push("Raw Data Stored".to_string());
    lines.push("1\t0.25\t0.5".to_string());
    lines.push("2\t0.75\t1.0".to_string());
    lines.join("\n")
}

fn write_measurement(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("measurement fixture should be written");
    path
}

const QUADRUPOLE: [(usize, usize, f64); 5] = [
    (1, 1, 3.0e-6),
    (1, 3, -1.2e-6),
    (2, 1, 0.3),
    (2, 5, 1.5e-4),
    (6, 1, 6.0e-5),
];

#[test]
fn english_and_portuguese_files_decode_to_the_same_record() {
    let english = MeasurementRecord::from_file(fixture_path("bqf_053_en.dat"))
        .expect("english fixture should parse");
    let portuguese = MeasurementRecord::from_file(fixture_path("bqf_053_pt.dat"))
        .expect("portuguese fixture should parse");

    assert_eq!(english.magnet_name(), Some("BQF-053"));
    assert_eq!(english.magnet_name(), portuguese.magnet_name());
    assert_eq!(english.date(), NaiveDate::from_ymd_opt(2016, 10, 5));
    assert_eq!(english.date(), portuguese.date());
    assert_eq!(english.hour(), portuguese.hour());
    assert_eq!(english.scalars(), portuguese.scalars());
    assert_eq!(english.multipoles(), portuguese.multipoles());
    assert_eq!(english.curves(), portuguese.curves());
    assert_ne!(english.source(), portuguese.source());
}

#[test]
fn legacy_fixture_carries_derived_quantities() {
    let record = MeasurementRecord::from_file(fixture_path("bqf_053_pt.dat"))
        .expect("fixture should parse");

    assert_eq!(record.main_harmonic(), 2);
    assert!(!record.skew_magnet());
    assert_eq!(record.magnet_model(), Some(MagnetModel::Quadrupole));
    assert_close(record.normalization_radius().unwrap_or_default(), 0.0175, 1e-15);

    assert_close(record.magnetic_center_x(), 2.0e-5, 1e-15);
    assert_close(record.magnetic_center_y(), -1.0e-5, 1e-15);
    assert!(record.magnetic_center_x_err() > 0.0);
    assert_close(record.roll(), 2.0e-4, 1e-15);
    assert_close(record.roll_err(), 1.0e-5, 1e-15);

    let scalars = record.scalars();
    assert_close(record.main_coil_current_avg(), 120.0012, 1e-12);
    assert_eq!(scalars.n_integration_points, Some(128));
    assert_eq!(scalars.bench.as_deref(), Some("bancada 2"));
    assert_eq!(scalars.comments.as_deref(), Some("medida após ajuste fino"));
    assert_close(
        scalars.magnet_resistance_avg.unwrap_or_default(),
        11.81 / 120.0012,
        1e-12,
    );
    assert_eq!(record.trim_coil_current_avg(), None);

    // Written before the integrator change: samples are stored in pV.s.
    assert_eq!(record.curve_unit_factor(), 1.0e-12);
    assert_eq!(record.curves().npoints(), 3);
    assert_eq!(record.curves().ncurves(), 3);
    assert_close(record.curves().sample(0, 0).unwrap_or_default(), 12.5e-12, 1e-24);
    assert_close(record.curves().sample(2, 1).unwrap_or_default(), -2.0e-12, 1e-24);
}

#[test]
fn main_harmonic_is_the_row_carrying_the_roll() {
    let temp = TempDir::new().expect("tempdir should be created");
    for (harmonic, expected_model) in [
        (1, MagnetModel::Dipole),
        (2, MagnetModel::Quadrupole),
        (3, MagnetModel::Sextupole),
    ] {
        let text = measurement_text(
            &[("magnet_name", "X-001"), ("main_coil_current_avg", "10.0")],
            &[(harmonic, 1, 0.5), (harmonic, 5, 1.0e-3)],
        );
        let path = write_measurement(temp.path(), &format!("h{harmonic}.dat"), &text);
        let record = MeasurementRecord::from_file(&path).expect("measurement should parse");
        assert_eq!(record.main_harmonic(), harmonic);
        assert_eq!(record.magnet_model(), Some(expected_model));
        assert_eq!(record.multipoles().main_harmonic(), Some(harmonic));
    }
}

#[test]
fn dipole_reports_zero_center_with_zero_error() {
    let text = measurement_text(
        &[("magnet_name", "BD-031"), ("main_coil_current_avg", "990.0")],
        &[(1, 1, 1.2), (1, 5, 3.0e-4), (2, 1, 4.0e-5), (2, 3, -2.0e-5)],
    );
    let record = MeasurementRecord::from_text(&text, MeasurementSource::Memory("bd".to_string()))
        .expect("dipole should parse");

    assert_eq!(record.main_harmonic(), 1);
    assert_eq!(record.magnetic_center_x(), 0.0);
    assert_eq!(record.magnetic_center_y(), 0.0);
    assert_eq!(record.magnetic_center_x_err(), 0.0);
    assert_eq!(record.magnetic_center_y_err(), 0.0);
    assert_close(record.roll(), 3.0e-4, 1e-18);
}

#[test]
fn quadrupole_with_twelve_millimeter_header() {
    let temp = TempDir::new().expect("tempdir should be created");
    let text = measurement_text(
        &[
            ("magnet_name", "Q20-004"),
            ("date", "2018-02-14"),
            ("main_coil_current_avg", "150.0"),
            ("trim_coil_current_avg", "1.5"),
        ],
        &QUADRUPOLE,
    );
    let path = write_measurement(temp.path(), "q20_004.dat", &text);
    let record = MeasurementRecord::from_file(&path).expect("quadrupole should parse");

    assert_eq!(record.main_harmonic(), 2);
    assert_eq!(record.normalization_radius(), Some(0.012));
    assert_eq!(record.trim_coil_current_avg(), Some(1.5));
    assert_eq!(record.curve_unit_factor(), 1.0);
    assert_eq!(record.curves().curve(1), Some(vec![0.5, 1.0]));
    assert_close(record.magnetic_center_x(), -1.0e-5, 1e-18);
    assert_close(record.magnetic_center_y(), 4.0e-6, 1e-18);
    assert_eq!(
        record.multipoles().value(6, MultipoleColumn::Normal),
        Some(6.0e-5)
    );
}

#[test]
fn missing_multipole_block_is_fatal() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = write_measurement(
        temp.path(),
        "no_block.dat",
        "magnet_name\tQ20-004\nmain_coil_current_avg\t150.0\nRaw Data Stored\n1\t0.1\n",
    );
    let error = MeasurementRecord::from_file(&path).expect_err("block is missing");
    assert_eq!(error.placeholder(), "INPUT.MULTIPOLE_BLOCK");
    assert_eq!(error.exit_code(), 2);
    assert!(error.message().contains("no_block.dat"));
}

#[test]
fn missing_raw_curve_block_is_fatal() {
    let text = measurement_text(&[("main_coil_current_avg", "150.0")], &QUADRUPOLE);
    let truncated = &text[..text.find("Raw Data Stored").unwrap_or(text.len())];
    let error = MeasurementRecord::from_text(truncated, MeasurementSource::Memory("cut".into()))
        .expect_err("curve block is missing");
    assert_eq!(error.placeholder(), "INPUT.RAW_CURVE_BLOCK");
}

#[test]
fn missing_main_current_is_fatal_but_other_scalars_are_optional() {
    let missing_current = measurement_text(&[("magnet_name", "Q20-004")], &QUADRUPOLE);
    let error =
        MeasurementRecord::from_text(&missing_current, MeasurementSource::Memory("a".into()))
            .expect_err("main current is required");
    assert_eq!(error.placeholder(), "INPUT.MAIN_COIL_CURRENT");

    let minimal = measurement_text(
        &[("main_coil_current_avg", "150.0"), ("temperature", "warm")],
        &QUADRUPOLE,
    );
    let record = MeasurementRecord::from_text(&minimal, MeasurementSource::Memory("b".into()))
        .expect("only the main current is required");
    assert_eq!(record.magnet_name(), None);
    assert_eq!(record.date(), None);
    assert_eq!(record.scalars().temperature, None);
    assert_eq!(record.trim_coil_current_avg(), None);
    assert_eq!(record.scalars().magnet_resistance_avg, None);
}

#[test]
fn table_without_roll_entry_is_fatal() {
    let text = measurement_text(&[("main_coil_current_avg", "1.0")], &[(2, 1, 0.3)]);
    let error = MeasurementRecord::from_text(&text, MeasurementSource::Memory("flat".into()))
        .expect_err("no main harmonic");
    assert_eq!(error.placeholder(), "INPUT.MULTIPOLE_MAIN_HARMONIC");
}

#[test]
fn skew_main_coil_flags_a_skew_magnet() {
    let text = measurement_text(
        &[
            ("magnet_name", "QS-002"),
            ("main_coil_current_avg", "5.0"),
            ("main_coil_type", "Skew Quadrupole"),
        ],
        &[(1, 1, 2.0e-6), (2, 3, 0.1), (2, 5, 5.0e-4)],
    );
    let record = MeasurementRecord::from_text(&text, MeasurementSource::Memory("qs".into()))
        .expect("skew quadrupole should parse");

    assert!(record.skew_magnet());
    assert_eq!(record.magnet_model(), Some(MagnetModel::SkewQuadrupole));
    // The normal dipole term feeds the vertical offset of a skew magnet.
    assert_close(record.magnetic_center_y(), 2.0e-5, 1e-18);
    assert_eq!(record.magnetic_center_x(), 0.0);
}

#[test]
fn store_rows_rebuild_the_same_record_as_files() {
    let text = measurement_text(
        &[("magnet_name", "Q20-004"), ("main_coil_current_avg", "150.0")],
        &QUADRUPOLE,
    );
    let from_text = MeasurementRecord::from_text(&text, MeasurementSource::Memory("q".into()))
        .expect("text should parse");

    let rows = harmonic_rows(&QUADRUPOLE);
    let row = MeasurementRow {
        id: 42,
        fields: vec![
            ("magnet_name".to_string(), "Q20-004".to_string()),
            ("main_coil_current_avg".to_string(), "150.0".to_string()),
        ],
        multipoles: format!("{HEADER}\n{}", rows.join("\n")),
        curves: "1\t0.25\t0.5\n2\t0.75\t1.0".to_string(),
    };
    let mut store = InMemoryStore::new();
    store.insert(row.clone());

    let from_row = MeasurementRecord::from_row(&row).expect("row should parse");
    let from_store = MeasurementRecord::from_store(&store, 42).expect("stored row should parse");

    assert_eq!(from_row, from_store);
    assert_eq!(from_row.source(), &MeasurementSource::StoreRow(42));
    assert_eq!(from_row.multipoles(), from_text.multipoles());
    assert_eq!(from_row.curves(), from_text.curves());
    assert_eq!(from_row.scalars(), from_text.scalars());

    let error = MeasurementRecord::from_store(&store, 7).expect_err("row 7 is absent");
    assert!(error.message().contains("row 7"));
}

#[test]
fn two_digit_year_selects_the_current_integrator_factor() {
    let text = measurement_text(
        &[("data", "05/10/17"), ("main_coil_current_avg", "1.0")],
        &QUADRUPOLE,
    );
    let record = MeasurementRecord::from_text(&text, MeasurementSource::Memory("yy".into()))
        .expect("short-year file should parse");

    assert_eq!(record.date(), NaiveDate::from_ymd_opt(2017, 10, 5));
    assert_eq!(record.curve_unit_factor(), 1.0);
    assert_eq!(record.curves().curve(1), Some(vec![0.5, 1.0]));
}

#[test]
fn every_header_field_reads_the_same_under_both_spellings() {
    let parse = |tags: &[(&str, &str)]| {
        MeasurementRecord::from_text(
            &measurement_text(tags, &QUADRUPOLE),
            MeasurementSource::Memory("tags".into()),
        )
        .expect("tagged file should parse")
    };
    let current = ("main_coil_current_avg", "1.0");
    let baseline = parse(&[current]);

    for entry in ALL_FIELDS.iter().chain(std::iter::once(&COMMENTS)) {
        let value = match entry.field {
            "date" => "05/10/17",
            "hour" => "10:30:00",
            _ => "12",
        };
        let spelled = |tag: &'static str| -> Vec<(&'static str, &'static str)> {
            if entry.field == MAIN_COIL_CURRENT_AVG.field {
                vec![(tag, value)]
            } else {
                vec![current, (tag, value)]
            }
        };

        let english = parse(&spelled(entry.tags[0]));
        let portuguese = parse(&spelled(entry.tags[1]));
        assert_eq!(english, portuguese, "field '{}'", entry.field);
        assert_ne!(english, baseline, "field '{}' was not read", entry.field);
    }
}
