//! Fixed dimensions and markers of the rotating-coil measurement format.

/// Harmonic rows reported by the bench software (orders 1..=15).
pub const N_HARMONICS: usize = 15;
/// Columns per harmonic row.
pub const N_COLUMNS: usize = 13;

pub const COL_HARMONIC: usize = 0;
pub const COL_NORMAL: usize = 1;
pub const COL_NORMAL_ERR: usize = 2;
pub const COL_SKEW: usize = 3;
pub const COL_SKEW_ERR: usize = 4;
pub const COL_ROLL: usize = 5;
pub const COL_ROLL_ERR: usize = 6;
pub const COL_NORMALIZED_NORMAL: usize = 7;
pub const COL_NORMALIZED_NORMAL_ERR: usize = 8;
pub const COL_NORMALIZED_SKEW: usize = 9;
pub const COL_NORMALIZED_SKEW_ERR: usize = 10;
pub const COL_NORMALIZED_MAGNITUDE: usize = 11;
pub const COL_NORMALIZED_MAGNITUDE_ERR: usize = 12;

pub const MULTIPOLE_BLOCK_MARKERS: [&str; 2] = ["Reading Data", "Dados de Leitura"];
pub const RAW_CURVE_BLOCK_MARKERS: [&str; 2] = ["Raw Data Stored", "Dados Brutos"];

/// Case-insensitive text that flags a skew main coil on the block marker
/// line or in the main-coil type field.
pub const SKEW_FLAG: &str = "skew";

pub const MM_PER_M: f64 = 1.0e3;

pub const DEFAULT_MC_SAMPLES: usize = 5_000;
pub const DEFAULT_TRUNCATION: f64 = 1.0;

#[cfg(test)]
mod tests {
    use super::{
        COL_HARMONIC, COL_NORMALIZED_MAGNITUDE_ERR, COL_ROLL, COL_ROLL_ERR, N_COLUMNS,
        N_HARMONICS,
    };

    #[test]
    fn column_layout_fits_row_width() {
        assert_eq!(COL_HARMONIC, 0);
        assert_eq!(COL_ROLL_ERR, COL_ROLL + 1);
        assert_eq!(COL_NORMALIZED_MAGNITUDE_ERR, N_COLUMNS - 1);
        assert_eq!(N_HARMONICS, 15);
    }
}
