use super::parser::{derive_main_harmonic, is_skew_magnet, parse_identity, parse_scalars};
use crate::common::calibration::curve_unit_factor;
use crate::domain::{MagnetModel, MeasurementSource, ParserResult, RotcoilResult};
use crate::multipoles::{CurveMatrix, MultipoleTable};
use crate::parser::{parse_curve_block, parse_multipole_block, read_measurement_text, split_lines};
use crate::physics::center::{self, MagneticCenter, Roll};
use crate::physics::residual::{
    IntegratedField, ResidualField, ResidualMultipoles, calc_integrated_field,
    calc_residual_field, calc_residual_multipoles,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// Scalar header fields. Everything except the main-coil current is
/// optional and `None` when the tag is absent or unreadable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementScalars {
    pub filename: Option<String>,
    pub operator: Option<String>,
    pub software_version: Option<String>,
    pub bench: Option<String>,
    pub accelerator_type: Option<String>,
    pub main_coil_type: Option<String>,
    pub temperature: Option<f64>,

    pub rotation_motor_speed: Option<f64>,
    pub rotation_motor_acceleration: Option<f64>,
    pub coil_rotation_direction: Option<String>,
    pub integrator_gain: Option<f64>,
    pub n_integration_points: Option<i64>,
    pub n_turns: Option<i64>,
    pub analysis_interval: Option<String>,

    pub main_coil_current_avg: f64,
    pub main_coil_current_std: Option<f64>,
    pub trim_coil_current_avg: Option<f64>,
    pub trim_coil_current_std: Option<f64>,
    pub ch_coil_current_avg: Option<f64>,
    pub ch_coil_current_std: Option<f64>,
    pub cv_coil_current_avg: Option<f64>,
    pub cv_coil_current_std: Option<f64>,
    pub qs_coil_current_avg: Option<f64>,
    pub qs_coil_current_std: Option<f64>,
    pub main_coil_volt_avg: Option<f64>,
    pub main_coil_volt_std: Option<f64>,
    /// Reported, or derived from voltage and current.
    pub magnet_resistance_avg: Option<f64>,
    pub magnet_resistance_std: Option<f64>,

    pub rotating_coil_name: Option<String>,
    pub rotating_coil_type: Option<String>,
    pub rotating_coil_turns: Option<i64>,
    pub radius1: Option<f64>,
    pub radius2: Option<f64>,
    pub radius_delta: Option<f64>,
    pub trigger_ref: Option<i64>,
    pub comments: Option<String>,
}

/// One rotating-coil measurement, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    source: MeasurementSource,
    magnet_name: Option<String>,
    date: Option<NaiveDate>,
    hour: Option<String>,
    scalars: MeasurementScalars,
    main_harmonic: usize,
    skew_magnet: bool,
    magnet_model: Option<MagnetModel>,
    normalization_radius: Option<f64>,
    center: MagneticCenter,
    roll: Roll,
    curve_unit_factor: f64,
    multipoles: MultipoleTable,
    curves: CurveMatrix,
}

impl MeasurementRecord {
    pub fn from_file(path: impl AsRef<Path>) -> ParserResult<Self> {
        let path = path.as_ref();
        let text = read_measurement_text(path)?;
        Self::from_text(&text, MeasurementSource::File(path.to_path_buf()))
    }

    pub fn from_text(text: &str, source: MeasurementSource) -> ParserResult<Self> {
        Self::from_lines(&split_lines(text), source)
    }

    pub fn from_lines(lines: &[&str], source: MeasurementSource) -> ParserResult<Self> {
        let scalars = parse_scalars(lines, &source)?;
        let identity = parse_identity(lines, &source);

        let block = parse_multipole_block(lines, &source)?;
        let unit_factor = curve_unit_factor(identity.date);
        let curves = CurveMatrix::from_block(parse_curve_block(lines, unit_factor, &source)?);
        let multipoles = MultipoleTable::from_block(&block);

        let main_harmonic = derive_main_harmonic(&multipoles, &source)?;
        let skew_magnet = is_skew_magnet(&block.marker_line, scalars.main_coil_type.as_deref());
        let magnet_model = MagnetModel::from_harmonic(main_harmonic, skew_magnet);
        if block.reference_radius.is_none() {
            tracing::debug!("{} multipole header has no '@<radius>mm' entry", source);
        }

        let main_center = center::magnetic_center(&multipoles, main_harmonic, skew_magnet)?;
        let main_roll = center::roll(&multipoles, main_harmonic)?;

        Ok(Self {
            source,
            magnet_name: identity.magnet_name,
            date: identity.date,
            hour: identity.hour,
            scalars,
            main_harmonic,
            skew_magnet,
            magnet_model,
            normalization_radius: block.reference_radius,
            center: main_center,
            roll: main_roll,
            curve_unit_factor: unit_factor,
            multipoles,
            curves,
        })
    }

    pub fn source(&self) -> &MeasurementSource {
        &self.source
    }

    /// Normalized `FAMILY-INSTANCE` name.
    pub fn magnet_name(&self) -> Option<&str> {
        self.magnet_name.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn hour(&self) -> Option<&str> {
        self.hour.as_deref()
    }

    pub fn scalars(&self) -> &MeasurementScalars {
        &self.scalars
    }

    pub fn main_coil_current_avg(&self) -> f64 {
        self.scalars.main_coil_current_avg
    }

    pub fn trim_coil_current_avg(&self) -> Option<f64> {
        self.scalars.trim_coil_current_avg
    }

    /// 1 dipole, 2 quadrupole, 3 sextupole, ...
    pub fn main_harmonic(&self) -> usize {
        self.main_harmonic
    }

    pub fn skew_magnet(&self) -> bool {
        self.skew_magnet
    }

    /// `None` above sextupole order.
    pub fn magnet_model(&self) -> Option<MagnetModel> {
        self.magnet_model
    }

    /// Reference radius of the harmonic table in meters.
    pub fn normalization_radius(&self) -> Option<f64> {
        self.normalization_radius
    }

    pub fn magnetic_center(&self) -> MagneticCenter {
        self.center
    }

    pub fn magnetic_center_x(&self) -> f64 {
        self.center.x
    }

    pub fn magnetic_center_x_err(&self) -> f64 {
        self.center.x_error
    }

    pub fn magnetic_center_y(&self) -> f64 {
        self.center.y
    }

    pub fn magnetic_center_y_err(&self) -> f64 {
        self.center.y_error
    }

    pub fn roll(&self) -> f64 {
        self.roll.angle
    }

    pub fn roll_err(&self) -> f64 {
        self.roll.error
    }

    /// Factor the raw-curve samples were multiplied by.
    pub fn curve_unit_factor(&self) -> f64 {
        self.curve_unit_factor
    }

    pub fn multipoles(&self) -> &MultipoleTable {
        &self.multipoles
    }

    pub fn curves(&self) -> &CurveMatrix {
        &self.curves
    }

    pub fn residual_field(&self, pos: &[f64]) -> RotcoilResult<ResidualField> {
        calc_residual_field(&self.multipoles, self.main_harmonic, self.skew_magnet, pos)
    }

    pub fn residual_multipoles(&self, pos: &[f64]) -> RotcoilResult<ResidualMultipoles> {
        calc_residual_multipoles(&self.multipoles, self.main_harmonic, self.skew_magnet, pos)
    }

    pub fn integrated_field(&self, pos: &[f64]) -> IntegratedField {
        calc_integrated_field(&self.multipoles, pos)
    }
}
