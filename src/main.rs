//! Flowgrade - flowchart grading CLI
//!
//! Validates learner flowcharts, orders their steps, asks an evaluator for a
//! semantic score and fuses both into a final grade.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;
use flowgrade_core::error::{ExitCode as FlowgradeExitCode, FlowgradeError};
use flowgrade_core::format::OutputFormat;
use flowgrade_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // clap can fail before `Cli.format` exists; honor a JSON request anyway
        Err(err) if argv_requests_json() && !is_informational(&err) => {
            let error = usage_error(&err);
            eprintln!("{}", error.to_json());
            return ExitCode::from(error.exit_code() as u8);
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(FlowgradeExitCode::Success as u8),
        Err(e) => {
            let exit_code = e.exit_code();

            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {}", e);
            }

            ExitCode::from(exit_code as u8)
        }
    }
}

/// Help and version output are not errors
fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn usage_error(err: &clap::Error) -> FlowgradeError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => FlowgradeError::UsageError(err.to_string()),
        _ => FlowgradeError::Other(err.to_string()),
    }
}

/// Scan raw argv for `--format json` / `--format=json`
fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
