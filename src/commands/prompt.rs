//! `flowgrade prompt` command
use std::path::Path;
use std::time::Instant;

use flowgrade_core::config::GradingConfig;
use flowgrade_core::error::Result;
use flowgrade_core::format::OutputFormat;
use flowgrade_core::pipeline::prepare;

use super::helpers::{load_diagram, resolve_expected};
use crate::cli::{Cli, ExpectedArgs};

/// Execute the prompt command
pub fn execute(
    cli: &Cli,
    config: &GradingConfig,
    path: &Path,
    expected: &ExpectedArgs,
    start: Instant,
) -> Result<()> {
    let diagram = load_diagram(path)?;
    let expected = resolve_expected(expected, config)?;
    let prepared = prepare(&diagram, &expected);
    tracing::debug!(elapsed = ?start.elapsed(), "prepare");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "strategy": prepared.ordering.strategy,
                "steps": prepared.steps,
                "diagnostics": prepared.validation.messages(),
                "expected": expected,
                "prompt": prepared.prompt,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", prepared.prompt);
        }
    }

    Ok(())
}
