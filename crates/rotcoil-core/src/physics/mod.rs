//! Derived quantities computed from a parsed harmonic table and from the
//! family error specifications. Everything here is a synchronous pure
//! computation over in-memory arrays.

pub mod center;
pub mod compliance;
pub mod envelope;
pub mod residual;

pub use center::{MagneticCenter, Roll, magnetic_center};
pub use compliance::{ComplianceReport, EnvelopeCheck, ToleranceCheck, check_compliance};
pub use envelope::{
    EnvelopeSettings, ErrorEnvelopeEstimator, ResidualEnvelope, truncated_standard_normal,
};
pub use residual::{
    IntegratedField, ResidualField, ResidualMultipoles, calc_integrated_field,
    calc_residual_field, calc_residual_multipoles,
};
