//! Magnetic center offset and roll from the harmonic table.
//!
//! With `n` the 0-based main index, the harmonic just below the main one is
//! what a transverse offset feeds into:
//!
//! ```text
//! x0 = -(1/n) * main[n-1] / main[n]
//! y0 = -(1/n) * sign * perp[n-1] / main[n]      sign = -1 for skew magnets
//! ```
//!
//! Dipoles have no center derivable from their multipoles and report zero.

use crate::common::constants::N_HARMONICS;
use crate::domain::{HarmonicSide, RotcoilError, RotcoilResult};
use crate::multipoles::{MultipoleColumn, MultipoleTable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagneticCenter {
    pub x: f64,
    pub x_error: f64,
    pub y: f64,
    pub y_error: f64,
}

impl MagneticCenter {
    pub const ZERO: Self = Self {
        x: 0.0,
        x_error: 0.0,
        y: 0.0,
        y_error: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Roll {
    pub angle: f64,
    pub error: f64,
}

/// The column holding the main multipole of a magnet.
pub fn main_side(skew_magnet: bool) -> HarmonicSide {
    if skew_magnet {
        HarmonicSide::Skew
    } else {
        HarmonicSide::Normal
    }
}

/// 0-based main index, rejecting orders outside the table.
pub fn main_index(main_harmonic: usize) -> RotcoilResult<usize> {
    if main_harmonic == 0 || main_harmonic > N_HARMONICS {
        return Err(RotcoilError::computation(
            "COMPUTE.MAIN_HARMONIC",
            format!(
                "main harmonic {} is outside 1..={}",
                main_harmonic, N_HARMONICS
            ),
        ));
    }
    Ok(main_harmonic - 1)
}

pub fn magnetic_center(
    table: &MultipoleTable,
    main_harmonic: usize,
    skew_magnet: bool,
) -> RotcoilResult<MagneticCenter> {
    let n = main_index(main_harmonic)?;
    if n == 0 {
        return Ok(MagneticCenter::ZERO);
    }

    let side = main_side(skew_magnet);
    let main = table.amplitudes(side);
    let main_err = table.amplitude_errors(side);
    let perp = table.amplitudes(side.opposite());
    let perp_err = table.amplitude_errors(side.opposite());
    let sign = if skew_magnet { -1.0 } else { 1.0 };
    let order = n as f64;

    Ok(MagneticCenter {
        x: -main[n - 1] / (order * main[n]),
        x_error: propagated_offset_error(main[n - 1], main_err[n - 1], main[n], main_err[n], order),
        y: -sign * perp[n - 1] / (order * main[n]),
        y_error: propagated_offset_error(perp[n - 1], perp_err[n - 1], main[n], main_err[n], order),
    })
}

/// First-order error of `lower / (order * main)`.
fn propagated_offset_error(lower: f64, lower_err: f64, main: f64, main_err: f64, order: f64) -> f64 {
    let from_lower = lower_err / (order * main);
    let from_main = lower * main_err / (order * main * main);
    (from_lower * from_lower + from_main * from_main).sqrt()
}

pub fn roll(table: &MultipoleTable, main_harmonic: usize) -> RotcoilResult<Roll> {
    main_index(main_harmonic)?;
    Ok(Roll {
        angle: table
            .value(main_harmonic, MultipoleColumn::Roll)
            .unwrap_or_default(),
        error: table
            .value(main_harmonic, MultipoleColumn::RollError)
            .unwrap_or_default(),
    })
}
