//! Residual and integrated field series along a transverse axis.
//!
//! Residual field relative to the main multipole, with `n` the 0-based main
//! index and positions normalized to the reference radius:
//!
//! ```text
//! residual(x) = sum_{m=n+1}^{14} (c[m] / main[n]) * x^(m-n)
//! ```
//!
//! A zero main multipole yields `inf`/`nan`; callers detect that themselves.

use super::center::{main_index, main_side};
use crate::common::constants::N_HARMONICS;
use crate::domain::{HarmonicSide, RotcoilResult};
use crate::multipoles::MultipoleTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualField {
    pub normal: Vec<f64>,
    pub skew: Vec<f64>,
}

impl ResidualField {
    pub fn side(&self, side: HarmonicSide) -> &[f64] {
        match side {
            HarmonicSide::Normal => &self.normal,
            HarmonicSide::Skew => &self.skew,
        }
    }
}

/// Per-harmonic residual contributions, `[harmonic][position]`. Rows at or
/// below the main harmonic are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualMultipoles {
    pub normal: Vec<Vec<f64>>,
    pub skew: Vec<Vec<f64>>,
}

/// Absolute field power series: `by` from the normal column, `bx` from the
/// skew column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegratedField {
    pub by: Vec<f64>,
    pub bx: Vec<f64>,
}

pub fn calc_residual_field(
    table: &MultipoleTable,
    main_harmonic: usize,
    skew_magnet: bool,
    pos: &[f64],
) -> RotcoilResult<ResidualField> {
    let per_harmonic = calc_residual_multipoles(table, main_harmonic, skew_magnet, pos)?;
    Ok(ResidualField {
        normal: sum_over_harmonics(&per_harmonic.normal, pos.len()),
        skew: sum_over_harmonics(&per_harmonic.skew, pos.len()),
    })
}

pub fn calc_residual_multipoles(
    table: &MultipoleTable,
    main_harmonic: usize,
    skew_magnet: bool,
    pos: &[f64],
) -> RotcoilResult<ResidualMultipoles> {
    let n = main_index(main_harmonic)?;
    let main_mult = table.amplitudes(main_side(skew_magnet))[n];

    let contributions = |coefficients: [f64; N_HARMONICS]| -> Vec<Vec<f64>> {
        (0..N_HARMONICS)
            .map(|m| {
                if m <= n {
                    return vec![0.0; pos.len()];
                }
                let relative = coefficients[m] / main_mult;
                let power = (m - n) as i32;
                pos.iter().map(|x| relative * x.powi(power)).collect()
            })
            .collect()
    };

    Ok(ResidualMultipoles {
        normal: contributions(table.normal()),
        skew: contributions(table.skew()),
    })
}

pub fn calc_integrated_field(table: &MultipoleTable, pos: &[f64]) -> IntegratedField {
    IntegratedField {
        by: power_series(&table.normal(), pos),
        bx: power_series(&table.skew(), pos),
    }
}

fn power_series(coefficients: &[f64; N_HARMONICS], pos: &[f64]) -> Vec<f64> {
    pos.iter()
        .map(|x| {
            coefficients
                .iter()
                .enumerate()
                .map(|(order, coefficient)| coefficient * x.powi(order as i32))
                .sum()
        })
        .collect()
}

fn sum_over_harmonics(rows: &[Vec<f64>], npos: usize) -> Vec<f64> {
    let mut total = vec![0.0; npos];
    for row in rows {
        for (sum, value) in total.iter_mut().zip(row) {
            *sum += value;
        }
    }
    total
}
