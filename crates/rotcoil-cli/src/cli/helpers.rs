use super::CliError;
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rotcoil_core::domain::{HarmonicSide, RotcoilError};
use rotcoil_core::export::write_text_artifact;
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub(super) fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Horizontal sampling grid in meters.
#[derive(clap::Args, Debug, Clone)]
pub(super) struct GridArgs {
    /// First position in meters (default: minus the reference radius)
    #[arg(long, allow_hyphen_values = true)]
    x_min: Option<f64>,

    /// Last position in meters (default: the reference radius)
    #[arg(long, allow_hyphen_values = true)]
    x_max: Option<f64>,

    /// Number of positions
    #[arg(long, default_value_t = 41)]
    points: usize,
}

impl GridArgs {
    pub(super) fn positions(&self, half_width: f64) -> Result<Vec<f64>, CliError> {
        let start = self.x_min.unwrap_or(-half_width);
        let end = self.x_max.unwrap_or(half_width);
        linear_grid(start, end, self.points)
    }
}

pub(super) fn linear_grid(start: f64, end: f64, points: usize) -> Result<Vec<f64>, CliError> {
    if points == 0 {
        return Err(CliError::Usage("--points must be at least 1".to_string()));
    }
    if !start.is_finite() || !end.is_finite() || start > end {
        return Err(CliError::Usage(format!(
            "invalid grid [{}, {}]; --x-min must not exceed --x-max",
            start, end
        )));
    }
    if points == 1 {
        return Ok(vec![start]);
    }

    let step = (end - start) / (points - 1) as f64;
    Ok((0..points)
        .map(|index| {
            if index == points - 1 {
                end
            } else {
                start + step * index as f64
            }
        })
        .collect())
}

pub(super) fn parse_side(label: &str) -> Result<HarmonicSide, String> {
    HarmonicSide::from_label(label)
        .ok_or_else(|| format!("unknown side '{}'; expected 'normal' or 'skew'", label))
}

pub(super) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Writes `content` to `output`, or prints it when no path is given.
pub(super) fn emit(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            write_text_artifact(path, content)
                .with_context(|| format!("failed to export '{}'", path.display()))?;
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

/// Reports a per-file failure and folds its exit code into `worst`.
pub(super) fn report_file_error(error: &RotcoilError, worst: &mut i32) {
    eprintln!("{}", error.diagnostic_line());
    *worst = (*worst).max(error.exit_code());
}

pub(super) fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| format!("{:.6e}", value))
}
