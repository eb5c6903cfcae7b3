//! `flowgrade config` command
use flowgrade_core::config::GradingConfig;
use flowgrade_core::error::Result;
use flowgrade_core::format::OutputFormat;

use crate::cli::Cli;

/// Print the effective configuration
pub fn execute(cli: &Cli, config: &GradingConfig) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Human => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
