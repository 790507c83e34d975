//! Comparison of one measured magnet with its family specification.

use super::envelope::{ErrorEnvelopeEstimator, ResidualEnvelope};
use crate::common::multipole_spec::{self, MultipoleErrorSpec};
use crate::domain::{HarmonicSide, RotcoilResult};
use crate::measurement::MeasurementRecord;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceCheck {
    pub measured: f64,
    pub tolerance: f64,
    pub passed: bool,
}

impl ToleranceCheck {
    pub fn new(measured: f64, tolerance: f64) -> Self {
        Self {
            measured,
            tolerance,
            passed: measured.abs() <= tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeCheck {
    pub side: HarmonicSide,
    pub measured: Vec<f64>,
    pub envelope: ResidualEnvelope,
    /// Indices into the position grid where the measurement leaves the
    /// envelope.
    pub outside: Vec<usize>,
}

impl EnvelopeCheck {
    fn new(side: HarmonicSide, measured: Vec<f64>, envelope: ResidualEnvelope) -> Self {
        let outside = measured
            .iter()
            .enumerate()
            .filter(|&(index, value)| !envelope.contains_at(index, *value))
            .map(|(index, _)| index)
            .collect();
        Self {
            side,
            measured,
            envelope,
            outside,
        }
    }

    pub fn passed(&self) -> bool {
        self.outside.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub magnet_name: String,
    pub family: &'static str,
    pub offset_x: ToleranceCheck,
    pub offset_y: ToleranceCheck,
    pub roll: ToleranceCheck,
    pub residual_normal: EnvelopeCheck,
    pub residual_skew: EnvelopeCheck,
}

impl ComplianceReport {
    pub fn passed(&self) -> bool {
        self.offset_x.passed
            && self.offset_y.passed
            && self.roll.passed
            && self.residual_normal.passed()
            && self.residual_skew.passed()
    }
}

/// Checks `record` against its family, or `None` when the magnet has no name
/// or no family specification.
///
/// Positions are in meters. The measured residual is evaluated at the
/// table's own reference radius, the envelope at the family's.
pub fn check_compliance<R: Rng + ?Sized>(
    record: &MeasurementRecord,
    estimator: &ErrorEnvelopeEstimator,
    pos: &[f64],
    rng: &mut R,
) -> RotcoilResult<Option<ComplianceReport>> {
    let Some(magnet_name) = record.magnet_name() else {
        return Ok(None);
    };
    let Some(spec) = multipole_spec::lookup(magnet_name) else {
        return Ok(None);
    };
    check_against_spec(record, magnet_name, spec, estimator, pos, rng).map(Some)
}

fn check_against_spec<R: Rng + ?Sized>(
    record: &MeasurementRecord,
    magnet_name: &str,
    spec: &'static MultipoleErrorSpec,
    estimator: &ErrorEnvelopeEstimator,
    pos: &[f64],
    rng: &mut R,
) -> RotcoilResult<ComplianceReport> {
    if record.main_harmonic() != spec.main_harmonic() {
        tracing::warn!(
            "{} has main harmonic {} but family '{}' specifies {}",
            record.source(),
            record.main_harmonic(),
            spec.family,
            spec.main_harmonic()
        );
    }

    let table_radius = record
        .normalization_radius()
        .unwrap_or(spec.reference_radius);
    let normalized: Vec<f64> = pos.iter().map(|x| x / table_radius).collect();
    let measured = record.residual_field(&normalized)?;

    let r0 = spec.reference_radius;
    let normal_envelope =
        estimator.residual_field_for_spec(spec, r0, pos, HarmonicSide::Normal, rng);
    let skew_envelope = estimator.residual_field_for_spec(spec, r0, pos, HarmonicSide::Skew, rng);

    Ok(ComplianceReport {
        magnet_name: magnet_name.to_string(),
        family: spec.family,
        offset_x: ToleranceCheck::new(record.magnetic_center_x(), spec.offset_x_tolerance),
        offset_y: ToleranceCheck::new(record.magnetic_center_y(), spec.offset_y_tolerance),
        roll: ToleranceCheck::new(record.roll(), spec.roll_tolerance),
        residual_normal: EnvelopeCheck::new(HarmonicSide::Normal, measured.normal, normal_envelope),
        residual_skew: EnvelopeCheck::new(HarmonicSide::Skew, measured.skew, skew_envelope),
    })
}
