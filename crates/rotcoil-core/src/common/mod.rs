pub mod calibration;
pub mod constants;
pub mod multipole_spec;
mod multipole_spec_data;
pub mod tags;

pub use calibration::{CurveCalibration, calibration_for_date, curve_unit_factor};
pub use multipole_spec::{MatchKind, MultipoleErrorSpec, SideErrors, SpecMatch, lookup, resolve};
pub use tags::FieldTags;
