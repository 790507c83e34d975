use super::CliError;
use super::helpers::{
    GridArgs, emit, format_optional, parse_side, report_file_error, seeded_rng,
};
use rotcoil_core::common::multipole_spec;
use rotcoil_core::domain::{HarmonicSide, RotcoilError};
use rotcoil_core::export::{
    envelope_table, format_fixed_f64, integrated_field_table, render_json, residual_table,
};
use rotcoil_core::measurement::MeasurementRecord;
use rotcoil_core::physics::{
    ComplianceReport, EnvelopeSettings, ErrorEnvelopeEstimator, check_compliance,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct SummaryArgs {
    /// Measurement files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print a JSON array instead of text
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct ResidualArgs {
    /// Measurement file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Reference radius in meters, used only when the table header has none
    #[arg(long)]
    r0: Option<f64>,

    #[command(flatten)]
    grid: GridArgs,

    /// Export the absolute integrated field instead of the residual
    #[arg(long)]
    integrated: bool,

    /// Output path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct EnvelopeArgs {
    /// Magnet name, e.g. BQF-053
    #[arg(value_name = "MAGNET")]
    magnet: String,

    /// Reference radius in meters (default: the family's)
    #[arg(long)]
    r0: Option<f64>,

    /// Field component: normal or skew
    #[arg(long, default_value = "normal", value_parser = parse_side)]
    side: HarmonicSide,

    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    sampling: SamplingArgs,

    /// Output path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct CheckArgs {
    /// Measurement files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    #[command(flatten)]
    grid: GridArgs,

    #[command(flatten)]
    sampling: SamplingArgs,

    /// Print JSON reports instead of text
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct SamplingArgs {
    /// Random seed for reproducible envelopes
    #[arg(long)]
    seed: Option<u64>,

    /// Monte-Carlo samples
    #[arg(long, default_value_t = EnvelopeSettings::default().samples)]
    samples: usize,

    /// Truncation bound of the normal draws, in standard deviations
    #[arg(long, default_value_t = EnvelopeSettings::default().truncation)]
    truncation: f64,
}

impl SamplingArgs {
    fn estimator(&self) -> Result<ErrorEnvelopeEstimator, CliError> {
        let settings = EnvelopeSettings {
            samples: self.samples,
            truncation: self.truncation,
        }
        .validate()?;
        Ok(ErrorEnvelopeEstimator::new(settings))
    }
}

#[derive(Debug, Serialize)]
struct MeasurementSummary {
    path: PathBuf,
    magnet_name: Option<String>,
    family: Option<&'static str>,
    date: Option<String>,
    main_harmonic: usize,
    skew_magnet: bool,
    magnet_model: Option<u8>,
    normalization_radius: Option<f64>,
    main_coil_current_avg: f64,
    magnetic_center_x: f64,
    magnetic_center_x_err: f64,
    magnetic_center_y: f64,
    magnetic_center_y_err: f64,
    roll: f64,
    roll_err: f64,
}

impl MeasurementSummary {
    fn from_record(path: PathBuf, record: &MeasurementRecord) -> Self {
        Self {
            path,
            magnet_name: record.magnet_name().map(str::to_string),
            family: record
                .magnet_name()
                .and_then(multipole_spec::lookup)
                .map(|spec| spec.family),
            date: record.date().map(|date| date.format("%Y-%m-%d").to_string()),
            main_harmonic: record.main_harmonic(),
            skew_magnet: record.skew_magnet(),
            magnet_model: record.magnet_model().map(|model| model.code()),
            normalization_radius: record.normalization_radius(),
            main_coil_current_avg: record.main_coil_current_avg(),
            magnetic_center_x: record.magnetic_center_x(),
            magnetic_center_x_err: record.magnetic_center_x_err(),
            magnetic_center_y: record.magnetic_center_y(),
            magnetic_center_y_err: record.magnetic_center_y_err(),
            roll: record.roll(),
            roll_err: record.roll_err(),
        }
    }

    fn render_text(&self) -> String {
        format!(
            "{}\n  magnet: {}\n  family: {}\n  date: {}\n  main harmonic: {} ({})\n  reference radius [m]: {}\n  main current [A]: {}\n  center x [m]: {:.6e} +/- {:.3e}\n  center y [m]: {:.6e} +/- {:.3e}\n  roll [rad]: {:.6e} +/- {:.3e}\n",
            self.path.display(),
            self.magnet_name.as_deref().unwrap_or("n/a"),
            self.family.unwrap_or("n/a"),
            self.date.as_deref().unwrap_or("n/a"),
            self.main_harmonic,
            if self.skew_magnet { "skew" } else { "normal" },
            format_optional(self.normalization_radius),
            format_fixed_f64(self.main_coil_current_avg, 12, 6),
            self.magnetic_center_x,
            self.magnetic_center_x_err,
            self.magnetic_center_y,
            self.magnetic_center_y_err,
            self.roll,
            self.roll_err,
        )
    }
}

pub(super) fn run_summary_command(args: SummaryArgs) -> Result<i32, CliError> {
    let mut worst = 0;
    let mut summaries = Vec::new();
    for path in args.files {
        match MeasurementRecord::from_file(&path) {
            Ok(record) => {
                tracing::debug!(
                    "{} parsed: main harmonic {}, {} raw curves",
                    record.source(),
                    record.main_harmonic(),
                    record.curves().ncurves()
                );
                summaries.push(MeasurementSummary::from_record(path, &record));
            }
            Err(error) => report_file_error(&error, &mut worst),
        }
    }

    if args.json {
        print!("{}", render_json(&summaries).map_err(anyhow::Error::from)?);
    } else {
        for summary in &summaries {
            print!("{}", summary.render_text());
        }
    }
    Ok(worst)
}

pub(super) fn run_residual_command(args: ResidualArgs) -> Result<i32, CliError> {
    let record = MeasurementRecord::from_file(&args.file)?;
    if let (Some(header_r0), Some(requested)) = (record.normalization_radius(), args.r0) {
        if header_r0 != requested {
            tracing::warn!(
                "{} was normalized at {} m; ignoring --r0 {}",
                args.file.display(),
                header_r0,
                requested
            );
        }
    }
    let r0 = record
        .normalization_radius()
        .or(args.r0)
        .ok_or_else(|| {
            CliError::Compute(RotcoilError::input_validation(
                "INPUT.CLI_REFERENCE_RADIUS",
                format!(
                    "'{}' has no reference radius in its table header; pass --r0",
                    args.file.display()
                ),
            ))
        })?;

    let pos = args.grid.positions(r0)?;
    let normalized: Vec<f64> = pos.iter().map(|x| x / r0).collect();

    let table = if args.integrated {
        integrated_field_table(&pos, &record.integrated_field(&normalized))
    } else {
        residual_table(&pos, &record.residual_field(&normalized)?)
    }
    .map_err(anyhow::Error::from)?;

    emit(args.output.as_deref(), &table)?;
    Ok(0)
}

pub(super) fn run_envelope_command(args: EnvelopeArgs) -> Result<i32, CliError> {
    let estimator = args.sampling.estimator()?;
    let Some(spec) = multipole_spec::lookup(&args.magnet) else {
        println!("no field-quality specification for magnet '{}'", args.magnet);
        return Ok(0);
    };

    let r0 = args.r0.unwrap_or(spec.reference_radius);
    let pos = args.grid.positions(r0)?;
    let mut rng = seeded_rng(args.sampling.seed);
    let envelope = estimator.residual_field_for_spec(spec, r0, &pos, args.side, &mut rng);

    let table = envelope_table(&envelope).map_err(anyhow::Error::from)?;
    emit(args.output.as_deref(), &table)?;
    Ok(0)
}

pub(super) fn run_check_command(args: CheckArgs) -> Result<i32, CliError> {
    let estimator = args.sampling.estimator()?;
    let mut rng = seeded_rng(args.sampling.seed);
    let mut worst = 0;
    let mut any_failed = false;
    let mut reports: Vec<ComplianceReport> = Vec::new();

    for path in &args.files {
        let record = match MeasurementRecord::from_file(path) {
            Ok(record) => record,
            Err(error) => {
                report_file_error(&error, &mut worst);
                continue;
            }
        };

        let half_width = record
            .magnet_name()
            .and_then(multipole_spec::lookup)
            .map(|spec| spec.reference_radius)
            .or(record.normalization_radius())
            .unwrap_or_default();
        let pos = args.grid.positions(half_width)?;

        match check_compliance(&record, &estimator, &pos, &mut rng) {
            Ok(Some(report)) => {
                any_failed |= !report.passed();
                if !args.json {
                    print!("{}", render_check_text(&path.display().to_string(), &report));
                }
                reports.push(report);
            }
            Ok(None) => {
                if !args.json {
                    println!("{}: no field-quality specification", path.display());
                }
            }
            Err(error) => report_file_error(&error, &mut worst),
        }
    }

    if args.json {
        print!("{}", render_json(&reports).map_err(anyhow::Error::from)?);
    }
    if worst == 0 && any_failed {
        worst = 1;
    }
    Ok(worst)
}

fn render_check_text(label: &str, report: &ComplianceReport) -> String {
    let verdict = |passed: bool| if passed { "ok" } else { "FAIL" };
    format!(
        "{}: {} ({}) {}\n  offset x: {:.3e} m (tol {:.1e}) {}\n  offset y: {:.3e} m (tol {:.1e}) {}\n  roll: {:.3e} rad (tol {:.1e}) {}\n  residual normal: {} of {} positions outside envelope\n  residual skew: {} of {} positions outside envelope\n",
        label,
        report.magnet_name,
        report.family,
        if report.passed() { "PASS" } else { "FAIL" },
        report.offset_x.measured,
        report.offset_x.tolerance,
        verdict(report.offset_x.passed),
        report.offset_y.measured,
        report.offset_y.tolerance,
        verdict(report.offset_y.passed),
        report.roll.measured,
        report.roll.tolerance,
        verdict(report.roll.passed),
        report.residual_normal.outside.len(),
        report.residual_normal.measured.len(),
        report.residual_skew.outside.len(),
        report.residual_skew.measured.len(),
    )
}
