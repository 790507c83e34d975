//! Harmonic table and raw-curve matrix of one measurement.

use crate::common::constants::{
    COL_HARMONIC, COL_NORMAL, COL_NORMAL_ERR, COL_NORMALIZED_MAGNITUDE,
    COL_NORMALIZED_MAGNITUDE_ERR, COL_NORMALIZED_NORMAL, COL_NORMALIZED_NORMAL_ERR,
    COL_NORMALIZED_SKEW, COL_NORMALIZED_SKEW_ERR, COL_ROLL, COL_ROLL_ERR, COL_SKEW, COL_SKEW_ERR,
    N_COLUMNS, N_HARMONICS,
};
use crate::domain::HarmonicSide;
use crate::parser::{CurveBlock, MultipoleBlock};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipoleColumn {
    Harmonic,
    Normal,
    NormalError,
    Skew,
    SkewError,
    Roll,
    RollError,
    NormalizedNormal,
    NormalizedNormalError,
    NormalizedSkew,
    NormalizedSkewError,
    NormalizedMagnitude,
    NormalizedMagnitudeError,
}

impl MultipoleColumn {
    pub const ALL: [Self; N_COLUMNS] = [
        Self::Harmonic,
        Self::Normal,
        Self::NormalError,
        Self::Skew,
        Self::SkewError,
        Self::Roll,
        Self::RollError,
        Self::NormalizedNormal,
        Self::NormalizedNormalError,
        Self::NormalizedSkew,
        Self::NormalizedSkewError,
        Self::NormalizedMagnitude,
        Self::NormalizedMagnitudeError,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Harmonic => COL_HARMONIC,
            Self::Normal => COL_NORMAL,
            Self::NormalError => COL_NORMAL_ERR,
            Self::Skew => COL_SKEW,
            Self::SkewError => COL_SKEW_ERR,
            Self::Roll => COL_ROLL,
            Self::RollError => COL_ROLL_ERR,
            Self::NormalizedNormal => COL_NORMALIZED_NORMAL,
            Self::NormalizedNormalError => COL_NORMALIZED_NORMAL_ERR,
            Self::NormalizedSkew => COL_NORMALIZED_SKEW,
            Self::NormalizedSkewError => COL_NORMALIZED_SKEW_ERR,
            Self::NormalizedMagnitude => COL_NORMALIZED_MAGNITUDE,
            Self::NormalizedMagnitudeError => COL_NORMALIZED_MAGNITUDE_ERR,
        }
    }

    pub const fn amplitude(side: HarmonicSide) -> Self {
        match side {
            HarmonicSide::Normal => Self::Normal,
            HarmonicSide::Skew => Self::Skew,
        }
    }

    pub const fn amplitude_error(side: HarmonicSide) -> Self {
        match side {
            HarmonicSide::Normal => Self::NormalError,
            HarmonicSide::Skew => Self::SkewError,
        }
    }
}

/// The 15 × 13 harmonic matrix. Row `i` holds harmonic order `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultipoleTable {
    column_names: Vec<String>,
    rows: [[f64; N_COLUMNS]; N_HARMONICS],
}

impl MultipoleTable {
    pub fn new(column_names: Vec<String>, rows: [[f64; N_COLUMNS]; N_HARMONICS]) -> Self {
        Self { column_names, rows }
    }

    pub fn from_block(block: &MultipoleBlock) -> Self {
        Self::new(block.column_names.clone(), block.rows)
    }

    /// Header names exactly as the bench software wrote them.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn rows(&self) -> &[[f64; N_COLUMNS]; N_HARMONICS] {
        &self.rows
    }

    /// Row for a 1-based harmonic order.
    pub fn row(&self, harmonic: usize) -> Option<&[f64; N_COLUMNS]> {
        harmonic
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
    }

    pub fn value(&self, harmonic: usize, column: MultipoleColumn) -> Option<f64> {
        self.row(harmonic).map(|row| row[column.index()])
    }

    /// A column across all harmonics, indexed 0-based by harmonic.
    pub fn column(&self, column: MultipoleColumn) -> [f64; N_HARMONICS] {
        let index = column.index();
        let mut values = [0.0; N_HARMONICS];
        for (value, row) in values.iter_mut().zip(self.rows.iter()) {
            *value = row[index];
        }
        values
    }

    pub fn amplitudes(&self, side: HarmonicSide) -> [f64; N_HARMONICS] {
        self.column(MultipoleColumn::amplitude(side))
    }

    pub fn amplitude_errors(&self, side: HarmonicSide) -> [f64; N_HARMONICS] {
        self.column(MultipoleColumn::amplitude_error(side))
    }

    pub fn normal(&self) -> [f64; N_HARMONICS] {
        self.amplitudes(HarmonicSide::Normal)
    }

    pub fn skew(&self) -> [f64; N_HARMONICS] {
        self.amplitudes(HarmonicSide::Skew)
    }

    pub fn roll(&self) -> [f64; N_HARMONICS] {
        self.column(MultipoleColumn::Roll)
    }

    /// 0-based indices of rows that report a roll angle.
    pub fn rows_with_roll(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row[COL_ROLL] != 0.0)
            .map(|(index, _)| index)
            .collect()
    }

    /// Only the main harmonic's row carries a roll angle, so the first
    /// nonzero roll identifies it (1-based).
    pub fn main_harmonic(&self) -> Option<usize> {
        self.rows_with_roll().first().map(|index| index + 1)
    }
}

/// `npoints × ncurves` raw integrator samples, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveMatrix {
    npoints: usize,
    ncurves: usize,
    samples: Vec<f64>,
}

impl CurveMatrix {
    pub fn from_block(block: CurveBlock) -> Self {
        Self {
            npoints: block.npoints,
            ncurves: block.ncurves,
            samples: block.samples,
        }
    }

    pub fn npoints(&self) -> usize {
        self.npoints
    }

    pub fn ncurves(&self) -> usize {
        self.ncurves
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample(&self, point: usize, curve: usize) -> Option<f64> {
        if point >= self.npoints || curve >= self.ncurves {
            return None;
        }
        self.samples.get(point * self.ncurves + curve).copied()
    }

    pub fn point(&self, point: usize) -> Option<&[f64]> {
        if point >= self.npoints {
            return None;
        }
        let start = point * self.ncurves;
        Some(&self.samples[start..start + self.ncurves])
    }

    pub fn curve(&self, curve: usize) -> Option<Vec<f64>> {
        if curve >= self.ncurves {
            return None;
        }
        Some(
            self.samples
                .iter()
                .skip(curve)
                .step_by(self.ncurves)
                .copied()
                .collect(),
        )
    }
}
