//! `flowgrade order` command
use std::path::Path;
use std::time::Instant;

use flowgrade_core::error::Result;
use flowgrade_core::format::OutputFormat;
use flowgrade_core::order::order;
use flowgrade_core::prompt::STEP_DELIMITER;

use super::helpers::load_diagram;
use crate::cli::Cli;

/// Execute the order command
pub fn execute(cli: &Cli, path: &Path, start: Instant) -> Result<()> {
    let diagram = load_diagram(path)?;
    let ordering = order(&diagram);
    let steps = ordering.texts(&diagram);
    tracing::debug!(elapsed = ?start.elapsed(), strategy = %ordering.strategy, "order");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "strategy": ordering.strategy,
                "node_ids": ordering.node_ids,
                "steps": steps,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if cli.quiet {
                println!("{}", steps.join(STEP_DELIMITER));
                return Ok(());
            }

            println!("Strategy: {}", ordering.strategy);
            for (i, (id, text)) in ordering.node_ids.iter().zip(&steps).enumerate() {
                println!("  {}. {} [{}]", i + 1, text, id);
            }
        }
    }

    Ok(())
}
