use super::model::MeasurementScalars;
use crate::common::constants::SKEW_FLAG;
use crate::common::tags;
use crate::domain::{MeasurementSource, ParserResult, RotcoilError};
use crate::multipoles::MultipoleTable;
use crate::parser::scanner::{find_field, find_text};
use chrono::NaiveDate;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct MeasurementIdentity {
    pub magnet_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub hour: Option<String>,
}

pub(super) fn parse_identity(lines: &[&str], source: &MeasurementSource) -> MeasurementIdentity {
    let magnet_name = find_text(lines, &tags::MAGNET_NAME)
        .and_then(|name| normalize_magnet_name(&name))
        .or_else(|| {
            find_text(lines, &tags::FILENAME).and_then(|name| name_from_file(Path::new(&name)))
        })
        .or_else(|| match source {
            MeasurementSource::File(path) => name_from_file(path),
            _ => None,
        });
    if magnet_name.is_none() {
        tracing::debug!("{} carries no magnet name", source);
    }

    MeasurementIdentity {
        magnet_name,
        date: find_field(lines, &tags::DATE),
        hour: find_text(lines, &tags::HOUR),
    }
}

pub(super) fn parse_scalars(
    lines: &[&str],
    source: &MeasurementSource,
) -> ParserResult<MeasurementScalars> {
    let main_coil_current_avg =
        find_field::<f64>(lines, &tags::MAIN_COIL_CURRENT_AVG).ok_or_else(|| {
            RotcoilError::input_validation(
                "INPUT.MAIN_COIL_CURRENT",
                format!(
                    "{} has no readable '{}' field",
                    source,
                    tags::MAIN_COIL_CURRENT_AVG.canonical()
                ),
            )
        })?;

    let main_coil_current_std = find_field(lines, &tags::MAIN_COIL_CURRENT_STD);
    let main_coil_volt_avg = find_field(lines, &tags::MAIN_COIL_VOLT_AVG);
    let main_coil_volt_std = find_field(lines, &tags::MAIN_COIL_VOLT_STD);
    let derived = derive_resistance(
        main_coil_volt_avg,
        main_coil_volt_std,
        main_coil_current_avg,
        main_coil_current_std,
    );

    Ok(MeasurementScalars {
        filename: find_text(lines, &tags::FILENAME),
        operator: find_text(lines, &tags::OPERATOR),
        software_version: find_text(lines, &tags::SOFTWARE_VERSION),
        bench: find_text(lines, &tags::BENCH),
        accelerator_type: find_text(lines, &tags::ACCELERATOR_TYPE),
        main_coil_type: find_text(lines, &tags::MAIN_COIL_TYPE),
        temperature: find_field(lines, &tags::TEMPERATURE),
        rotation_motor_speed: find_field(lines, &tags::ROTATION_MOTOR_SPEED),
        rotation_motor_acceleration: find_field(lines, &tags::ROTATION_MOTOR_ACCELERATION),
        coil_rotation_direction: find_text(lines, &tags::COIL_ROTATION_DIRECTION),
        integrator_gain: find_field(lines, &tags::INTEGRATOR_GAIN),
        n_integration_points: find_field(lines, &tags::N_INTEGRATION_POINTS),
        n_turns: find_field(lines, &tags::N_TURNS),
        analysis_interval: find_text(lines, &tags::ANALYSIS_INTERVAL),
        main_coil_current_avg,
        main_coil_current_std,
        trim_coil_current_avg: find_field(lines, &tags::TRIM_COIL_CURRENT_AVG),
        trim_coil_current_std: find_field(lines, &tags::TRIM_COIL_CURRENT_STD),
        ch_coil_current_avg: find_field(lines, &tags::CH_COIL_CURRENT_AVG),
        ch_coil_current_std: find_field(lines, &tags::CH_COIL_CURRENT_STD),
        cv_coil_current_avg: find_field(lines, &tags::CV_COIL_CURRENT_AVG),
        cv_coil_current_std: find_field(lines, &tags::CV_COIL_CURRENT_STD),
        qs_coil_current_avg: find_field(lines, &tags::QS_COIL_CURRENT_AVG),
        qs_coil_current_std: find_field(lines, &tags::QS_COIL_CURRENT_STD),
        main_coil_volt_avg,
        main_coil_volt_std,
        magnet_resistance_avg: find_field(lines, &tags::MAGNET_RESISTANCE_AVG)
            .or(derived.map(|(resistance, _)| resistance)),
        magnet_resistance_std: find_field(lines, &tags::MAGNET_RESISTANCE_STD)
            .or(derived.and_then(|(_, error)| error)),
        rotating_coil_name: find_text(lines, &tags::ROTATING_COIL_NAME),
        rotating_coil_type: find_text(lines, &tags::ROTATING_COIL_TYPE),
        rotating_coil_turns: find_field(lines, &tags::ROTATING_COIL_TURNS),
        radius1: find_field(lines, &tags::RADIUS1),
        radius2: find_field(lines, &tags::RADIUS2),
        radius_delta: find_field(lines, &tags::RADIUS_DELTA),
        trigger_ref: find_field(lines, &tags::TRIGGER_REF),
        comments: find_text(lines, &tags::COMMENTS),
    })
}

/// `R = V / I` with first-order error
/// `sqrt((sV / I)^2 + (V * sI / I^2)^2)`; the error needs both deviations.
pub(super) fn derive_resistance(
    volt_avg: Option<f64>,
    volt_std: Option<f64>,
    current_avg: f64,
    current_std: Option<f64>,
) -> Option<(f64, Option<f64>)> {
    let volt = volt_avg?;
    if current_avg == 0.0 {
        return None;
    }

    let resistance = volt / current_avg;
    let error = volt_std.zip(current_std).map(|(volt_std, current_std)| {
        let from_volt = volt_std / current_avg;
        let from_current = volt * current_std / (current_avg * current_avg);
        (from_volt * from_volt + from_current * from_current).sqrt()
    });
    Some((resistance, error))
}

/// 1-based main harmonic from the roll column. Exactly one row should carry
/// a roll; extra rows are tolerated and the lowest order wins.
pub(super) fn derive_main_harmonic(
    table: &MultipoleTable,
    source: &MeasurementSource,
) -> ParserResult<usize> {
    let rows = table.rows_with_roll();
    let Some(first) = rows.first() else {
        return Err(RotcoilError::input_validation(
            "INPUT.MULTIPOLE_MAIN_HARMONIC",
            format!("{} multipole block has no row with a nonzero roll", source),
        ));
    };
    if rows.len() > 1 {
        tracing::warn!(
            "{} reports a roll on harmonics {:?}; using harmonic {}",
            source,
            rows.iter().map(|index| index + 1).collect::<Vec<_>>(),
            first + 1
        );
    }
    Ok(first + 1)
}

pub(super) fn is_skew_magnet(marker_line: &str, main_coil_type: Option<&str>) -> bool {
    let flagged = |text: &str| text.to_ascii_lowercase().contains(SKEW_FLAG);
    flagged(marker_line) || main_coil_type.is_some_and(flagged)
}

/// `FAMILY-INSTANCE` from free-form names such as `bqf_053`, `BQF 053` or
/// `BQF-053-A`.
pub fn normalize_magnet_name(raw: &str) -> Option<String> {
    let upper = raw.trim().to_ascii_uppercase();
    let tokens: Vec<&str> = upper
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .take(2)
        .collect();
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.join("-"))
}

fn name_from_file(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(normalize_magnet_name)
}
