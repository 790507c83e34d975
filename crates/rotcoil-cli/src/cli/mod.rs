mod commands;
mod helpers;

use clap::Parser;
use rotcoil_core::domain::RotcoilError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let rotcoil_error = error.as_rotcoil_error();
            eprintln!("{}", rotcoil_error.diagnostic_line());
            if let Some(summary_line) = rotcoil_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            rotcoil_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "rotcoil", version, about = "Rotating-coil magnet measurement analysis")]
struct Cli {
    /// Log parser fallbacks and envelope runs (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Parse measurement files and print their derived quantities
    Summary(commands::SummaryArgs),
    /// Residual field of a measurement along the horizontal axis
    Residual(commands::ResidualArgs),
    /// Monte-Carlo error envelope of a magnet family
    Envelope(commands::EnvelopeArgs),
    /// Check measurements against their family specification
    Check(commands::CheckArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Summary(args) => commands::run_summary_command(args),
        CliCommand::Residual(args) => commands::run_residual_command(args),
        CliCommand::Envelope(args) => commands::run_envelope_command(args),
        CliCommand::Check(args) => commands::run_check_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(RotcoilError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_rotcoil_error(&self) -> RotcoilError {
        match self {
            Self::Usage(message) => {
                RotcoilError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => RotcoilError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

impl From<RotcoilError> for CliError {
    fn from(error: RotcoilError) -> Self {
        Self::Compute(error)
    }
}
