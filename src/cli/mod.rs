//! CLI argument parsing for flowgrade
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use flowgrade_core::format::OutputFormat;
pub use args::{DiagramArgs, ExpectedArgs, GradeArgs};
use parse::parse_format;

/// Flowgrade - grade learner flowcharts against an expected algorithm
#[derive(Parser, Debug)]
#[command(name = "flowgrade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Grading configuration file (default: ./flowgrade.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (e.g. "info", "flowgrade_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade a flowchart: structural checks, evaluator score and final grade
    Grade(GradeArgs),

    /// Run structural validation only
    Check(DiagramArgs),

    /// Print the canonical step ordering of a flowchart
    Order(DiagramArgs),

    /// Print the evaluator prompt without calling the evaluator
    Prompt {
        #[command(flatten)]
        diagram: DiagramArgs,

        #[command(flatten)]
        expected: ExpectedArgs,
    },

    /// Print the effective grading configuration
    Config,
}
