pub mod common;
pub mod domain;
pub mod export;
pub mod measurement;
pub mod multipoles;
pub mod parser;
pub mod physics;
pub mod store;

pub use domain::{
    ErrorCategory, HarmonicSide, MagnetModel, MeasurementSource, ParserResult, RotcoilError,
    RotcoilResult,
};
pub use measurement::{MeasurementRecord, MeasurementScalars};
pub use multipoles::{CurveMatrix, MultipoleColumn, MultipoleTable};
pub use physics::{EnvelopeSettings, ErrorEnvelopeEstimator, ResidualEnvelope};
pub use store::{InMemoryStore, MeasurementRow, MeasurementStore};
