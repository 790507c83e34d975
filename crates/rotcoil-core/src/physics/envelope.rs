//! Monte-Carlo error envelope of a magnet family's residual field.
//!
//! The systematic curve comes straight from the family's published
//! systematic multipoles. Random errors are sampled per rms monomial from a
//! standard normal truncated to `|z| <= truncation`, scaled by the published
//! rms magnitude, and added to the systematic curve; the envelope is the
//! pointwise min/max over all samples. The main index used for the powers is
//! the family's, not the measured magnet's.

use crate::common::constants::{DEFAULT_MC_SAMPLES, DEFAULT_TRUNCATION};
use crate::common::multipole_spec::{self, MultipoleErrorSpec};
use crate::domain::{HarmonicSide, RotcoilError, RotcoilResult};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvelopeSettings {
    pub samples: usize,
    /// Bound on `|z|` for the truncated standard normal.
    pub truncation: f64,
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_MC_SAMPLES,
            truncation: DEFAULT_TRUNCATION,
        }
    }
}

impl EnvelopeSettings {
    pub fn validate(self) -> RotcoilResult<Self> {
        if self.samples == 0 {
            return Err(RotcoilError::input_validation(
                "INPUT.ENVELOPE_SAMPLES",
                "envelope sample count must be positive",
            ));
        }
        if !self.truncation.is_finite() || self.truncation <= 0.0 {
            return Err(RotcoilError::input_validation(
                "INPUT.ENVELOPE_TRUNCATION",
                format!(
                    "envelope truncation must be a positive number, got {}",
                    self.truncation
                ),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualEnvelope {
    pub family: &'static str,
    pub side: HarmonicSide,
    pub reference_radius: f64,
    pub positions: Vec<f64>,
    pub systematic: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl ResidualEnvelope {
    /// Whether `values` lies inside `[min, max]` at every position.
    pub fn contains(&self, values: &[f64]) -> bool {
        values.len() == self.min.len()
            && values
                .iter()
                .enumerate()
                .all(|(index, value)| self.contains_at(index, *value))
    }

    pub fn contains_at(&self, index: usize, value: f64) -> bool {
        match (self.min.get(index), self.max.get(index)) {
            (Some(low), Some(high)) => *low <= value && value <= *high,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorEnvelopeEstimator {
    settings: EnvelopeSettings,
}

impl ErrorEnvelopeEstimator {
    pub fn new(settings: EnvelopeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> EnvelopeSettings {
        self.settings
    }

    /// Envelope for the family `magnet_name` belongs to, or `None` when no
    /// specification covers it.
    pub fn residual_field<R: Rng + ?Sized>(
        &self,
        r0: f64,
        pos: &[f64],
        magnet_name: &str,
        side: HarmonicSide,
        rng: &mut R,
    ) -> Option<ResidualEnvelope> {
        let spec = multipole_spec::lookup(magnet_name)?;
        Some(self.residual_field_for_spec(spec, r0, pos, side, rng))
    }

    /// Same as [`Self::residual_field`], drawing from the thread-local
    /// generator.
    pub fn residual_field_from_entropy(
        &self,
        r0: f64,
        pos: &[f64],
        magnet_name: &str,
        side: HarmonicSide,
    ) -> Option<ResidualEnvelope> {
        let mut rng = rand::thread_rng();
        self.residual_field(r0, pos, magnet_name, side, &mut rng)
    }

    pub fn residual_field_for_spec<R: Rng + ?Sized>(
        &self,
        spec: &'static MultipoleErrorSpec,
        r0: f64,
        pos: &[f64],
        side: HarmonicSide,
        rng: &mut R,
    ) -> ResidualEnvelope {
        let errors = spec.side(side);
        let main = spec.main;

        let sys_powers = normalized_powers(pos, r0, errors.sys_monomials, main);
        let systematic: Vec<f64> = (0..pos.len())
            .map(|index| {
                sys_powers
                    .iter()
                    .zip(errors.sys_relative)
                    .map(|(powers, magnitude)| magnitude * powers[index])
                    .sum()
            })
            .collect();

        let rms_powers = normalized_powers(pos, r0, errors.rms_monomials, main);
        let mut min = systematic.clone();
        let mut max = systematic.clone();
        let mut draws = vec![0.0; errors.rms_relative.len()];

        for _ in 0..self.settings.samples {
            for (draw, magnitude) in draws.iter_mut().zip(errors.rms_relative) {
                *draw = magnitude * truncated_standard_normal(rng, self.settings.truncation);
            }
            for (index, sys) in systematic.iter().enumerate() {
                let rms: f64 = rms_powers
                    .iter()
                    .zip(&draws)
                    .map(|(powers, draw)| draw * powers[index])
                    .sum();
                let value = sys + rms;
                min[index] = min[index].min(value);
                max[index] = max[index].max(value);
            }
        }

        tracing::info!(
            "envelope for family '{}' ({} side): {} samples over {} positions",
            spec.family,
            side,
            self.settings.samples,
            pos.len()
        );

        ResidualEnvelope {
            family: spec.family,
            side,
            reference_radius: r0,
            positions: pos.to_vec(),
            systematic,
            min,
            max,
        }
    }
}

/// `(x / r0)^(monomial - main)` for each monomial, `[monomial][position]`.
fn normalized_powers(pos: &[f64], r0: f64, monomials: &[usize], main: usize) -> Vec<Vec<f64>> {
    monomials
        .iter()
        .map(|&monomial| {
            let power = monomial as i32 - main as i32;
            pos.iter().map(|x| (x / r0).powi(power)).collect()
        })
        .collect()
}

/// Standard normal draw rejected until `|z| <= bound`. A non-positive bound
/// collapses the distribution to zero.
pub fn truncated_standard_normal<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    if bound.is_nan() || bound <= 0.0 {
        return 0.0;
    }
    loop {
        let z: f64 = rng.sample(StandardNormal);
        if z.abs() <= bound {
            return z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EnvelopeSettings, ErrorEnvelopeEstimator, ResidualEnvelope, truncated_standard_normal,
    };
    use crate::common::multipole_spec::{MultipoleErrorSpec, SideErrors};
    use crate::domain::HarmonicSide;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    static QUIET_SPEC: MultipoleErrorSpec = MultipoleErrorSpec {
        family: "QT",
        main: 1,
        main_side: HarmonicSide::Normal,
        reference_radius: 0.01,
        offset_x_tolerance: 1.0e-4,
        offset_y_tolerance: 1.0e-4,
        roll_tolerance: 1.0e-3,
        normal: SideErrors {
            sys_monomials: &[5],
            sys_relative: &[2.0e-3],
            ..SideErrors::EMPTY
        },
        skew: SideErrors::EMPTY,
    };

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn grid() -> Vec<f64> {
        (-6..=6).map(|step| step as f64 * 2.0e-3).collect()
    }

    #[test]
    fn truncated_draws_respect_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            assert!(truncated_standard_normal(&mut rng, 1.0).abs() <= 1.0);
        }
        assert_eq!(truncated_standard_normal(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn unknown_family_has_no_envelope() {
        let estimator = ErrorEnvelopeEstimator::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(
            estimator
                .residual_field(0.012, &grid(), "ZZZ-01", HarmonicSide::Normal, &mut rng)
                .is_none()
        );
    }

    #[test]
    fn systematic_curve_uses_family_main_index() {
        let estimator = ErrorEnvelopeEstimator::new(EnvelopeSettings {
            samples: 10,
            truncation: 1.0,
        });
        let mut rng = StdRng::seed_from_u64(3);
        let envelope = estimator.residual_field_for_spec(
            &QUIET_SPEC,
            0.01,
            &[0.005, 0.01, -0.02],
            HarmonicSide::Normal,
            &mut rng,
        );

        assert_close(envelope.systematic[0], 2.0e-3 * 0.5_f64.powi(4), 1e-18);
        assert_close(envelope.systematic[1], 2.0e-3, 1e-18);
        assert_close(envelope.systematic[2], 2.0e-3 * 16.0, 1e-15);
        // No rms terms: the envelope collapses onto the systematic curve.
        assert_eq!(envelope.min, envelope.systematic);
        assert_eq!(envelope.max, envelope.systematic);

        let skew = estimator.residual_field_for_spec(
            &QUIET_SPEC,
            0.01,
            &[0.005],
            HarmonicSide::Skew,
            &mut rng,
        );
        assert_eq!(skew.systematic, vec![0.0]);
    }

    #[test]
    fn envelope_brackets_systematic_curve_for_every_seed() {
        let estimator = ErrorEnvelopeEstimator::new(EnvelopeSettings {
            samples: 500,
            truncation: 1.0,
        });
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let envelope: ResidualEnvelope = estimator
                .residual_field(0.012, &grid(), "Q20-004", HarmonicSide::Normal, &mut rng)
                .expect("Q20 spec");
            assert_eq!(envelope.family, "Q20");
            for index in 0..envelope.positions.len() {
                assert!(envelope.min[index] <= envelope.systematic[index]);
                assert!(envelope.systematic[index] <= envelope.max[index]);
            }
            assert!(envelope.contains(&envelope.systematic));
        }
    }

    #[test]
    fn same_seed_reproduces_the_envelope() {
        let estimator = ErrorEnvelopeEstimator::new(EnvelopeSettings {
            samples: 200,
            truncation: 1.0,
        });
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            estimator.residual_field(0.0175, &grid(), "BQF-01", HarmonicSide::Skew, &mut rng)
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn envelope_width_is_bounded_by_truncated_rms_sum() {
        let estimator = ErrorEnvelopeEstimator::new(EnvelopeSettings {
            samples: 300,
            truncation: 1.0,
        });
        let mut rng = StdRng::seed_from_u64(11);
        let spec = crate::common::multipole_spec::lookup("BD-001").expect("BD spec");
        let r0 = spec.reference_radius;
        let envelope =
            estimator.residual_field_for_spec(spec, r0, &[r0], HarmonicSide::Normal, &mut rng);

        // At x = r0 every power is 1, so each draw moves at most its magnitude.
        let bound: f64 = spec.normal.rms_relative.iter().sum();
        assert!(envelope.max[0] - envelope.systematic[0] <= bound + 1e-15);
        assert!(envelope.systematic[0] - envelope.min[0] <= bound + 1e-15);
        assert!(envelope.max[0] > envelope.min[0]);
    }

    #[test]
    fn settings_reject_degenerate_values() {
        assert!(EnvelopeSettings::default().validate().is_ok());
        let no_samples = EnvelopeSettings {
            samples: 0,
            truncation: 1.0,
        };
        assert_eq!(
            no_samples.validate().expect_err("zero samples").placeholder(),
            "INPUT.ENVELOPE_SAMPLES"
        );
        let no_width = EnvelopeSettings {
            samples: 10,
            truncation: f64::NAN,
        };
        assert!(no_width.validate().is_err());
    }
}
