//! Command dispatch logic for flowgrade
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use flowgrade_core::config::GradingConfig;
use flowgrade_core::error::Result;

use crate::cli::{Cli, Commands};
use crate::commands;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let Some(command) = &cli.command else {
        return handle_no_command();
    };

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = GradingConfig::resolve(cli.config.as_deref(), &cwd)?;
    tracing::debug!(elapsed = ?start.elapsed(), "resolve_config");

    match command {
        Commands::Grade(args) => commands::grade::execute(cli, &config, args, start),
        Commands::Check(args) => commands::check::execute(cli, &args.diagram, start),
        Commands::Order(args) => commands::order::execute(cli, &args.diagram, start),
        Commands::Prompt { diagram, expected } => {
            commands::prompt::execute(cli, &config, &diagram.diagram, expected, start)
        }
        Commands::Config => commands::config::execute(cli, &config),
    }
}

fn handle_no_command() -> Result<()> {
    println!("flowgrade {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Grades learner flowcharts against an expected algorithm.");
    println!();
    println!("Run `flowgrade --help` for usage information.");
    Ok(())
}
