pub mod errors;

pub use errors::{ErrorCategory, ParserResult, RotcoilError, RotcoilResult};

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Field component of a multipole coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicSide {
    Normal,
    Skew,
}

impl HarmonicSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Skew => "skew",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Normal => Self::Skew,
            Self::Skew => Self::Normal,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "normal" | "n" => Some(Self::Normal),
            "skew" | "s" => Some(Self::Skew),
            _ => None,
        }
    }
}

impl Display for HarmonicSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Disambiguates magnets that share a main harmonic but differ in
/// orientation. The numeric codes are the ones stored alongside
/// measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnetModel {
    Dipole,
    Quadrupole,
    Sextupole,
    SkewDipole,
    SkewQuadrupole,
    SkewSextupole,
}

impl MagnetModel {
    pub fn from_harmonic(main_harmonic: usize, skew_magnet: bool) -> Option<Self> {
        match (main_harmonic, skew_magnet) {
            (1, false) => Some(Self::Dipole),
            (2, false) => Some(Self::Quadrupole),
            (3, false) => Some(Self::Sextupole),
            (1, true) => Some(Self::SkewDipole),
            (2, true) => Some(Self::SkewQuadrupole),
            (3, true) => Some(Self::SkewSextupole),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::Dipole => 1,
            Self::Quadrupole => 2,
            Self::Sextupole => 3,
            Self::SkewDipole => 4,
            Self::SkewQuadrupole => 5,
            Self::SkewSextupole => 6,
        }
    }

    pub const fn main_harmonic(self) -> usize {
        match self {
            Self::Dipole | Self::SkewDipole => 1,
            Self::Quadrupole | Self::SkewQuadrupole => 2,
            Self::Sextupole | Self::SkewSextupole => 3,
        }
    }

    pub const fn is_skew(self) -> bool {
        matches!(
            self,
            Self::SkewDipole | Self::SkewQuadrupole | Self::SkewSextupole
        )
    }
}

/// Where a measurement's raw lines came from. Used to label diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MeasurementSource {
    File(PathBuf),
    StoreRow(i64),
    Memory(String),
}

impl Display for MeasurementSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "'{}'", path.display()),
            Self::StoreRow(id) => write!(f, "row {}", id),
            Self::Memory(label) => write!(f, "'{}'", label),
        }
    }
}
