//! Unit factors applied to the stored raw-curve samples.
//!
//! The integrator firmware changed the unit of the raw samples once; files
//! written before that change store picovolt-seconds. Each entry takes effect
//! on its date and stays in force until the next entry.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveCalibration {
    /// First day (inclusive) on which this factor applies.
    pub effective_from: (i32, u32, u32),
    pub factor: f64,
    pub label: &'static str,
}

impl CurveCalibration {
    pub fn effective_date(&self) -> Option<NaiveDate> {
        let (year, month, day) = self.effective_from;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Ordered by `effective_from`.
pub const CURVE_CALIBRATIONS: [CurveCalibration; 2] = [
    CurveCalibration {
        effective_from: (1970, 1, 1),
        factor: 1.0e-12,
        label: "legacy integrator (pV.s)",
    },
    CurveCalibration {
        effective_from: (2016, 12, 1),
        factor: 1.0,
        label: "current integrator (V.s)",
    },
];

/// Calibration in force on `date`.
///
/// Dates before the first entry use the first entry. An unknown date uses
/// the most recent entry.
pub fn calibration_for_date(date: Option<NaiveDate>) -> &'static CurveCalibration {
    calibration_in_table(&CURVE_CALIBRATIONS, date)
}

pub fn curve_unit_factor(date: Option<NaiveDate>) -> f64 {
    calibration_for_date(date).factor
}

pub(crate) fn calibration_in_table(
    table: &'static [CurveCalibration],
    date: Option<NaiveDate>,
) -> &'static CurveCalibration {
    let latest = &table[table.len() - 1];
    let Some(date) = date else {
        tracing::warn!(
            "measurement date unknown; applying '{}' raw-curve factor",
            latest.label
        );
        return latest;
    };

    table
        .iter()
        .rev()
        .find(|entry| entry.effective_date().is_some_and(|from| from <= date))
        .unwrap_or(&table[0])
}
