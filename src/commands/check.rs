//! `flowgrade check` command
//!
//! Structural validation only. A structural score of 0 is still a
//! successful run.
use std::path::Path;
use std::time::Instant;

use flowgrade_core::error::Result;
use flowgrade_core::format::OutputFormat;
use flowgrade_core::validate::validate;

use super::helpers::{load_diagram, print_diagnostics};
use crate::cli::Cli;

/// Execute the check command
pub fn execute(cli: &Cli, path: &Path, start: Instant) -> Result<()> {
    let diagram = load_diagram(path)?;
    let result = validate(&diagram);
    tracing::debug!(elapsed = ?start.elapsed(), "validate");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "nodes": diagram.node_count(),
                "edges": diagram.edge_count(),
                "structural_score": result.structural_score,
                "has_cycle": result.has_cycle,
                "error_count": result.error_count(),
                "warning_count": result.warning_count(),
                "diagnostics": result.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if result.diagnostics.is_empty() {
                if !cli.quiet {
                    println!(
                        "Flowchart is structurally sound ({} nodes, {} edges)",
                        diagram.node_count(),
                        diagram.edge_count()
                    );
                }
            } else {
                println!(
                    "Found {} issue(s) in {} nodes:",
                    result.diagnostics.len(),
                    diagram.node_count()
                );
                println!();
                print_diagnostics(&result.diagnostics);
                println!();
                println!(
                    "Summary: {} error(s), {} warning(s)",
                    result.error_count(),
                    result.warning_count()
                );
            }

            if !cli.quiet {
                println!("Structural score: {}", result.structural_score);
                if result.has_cycle {
                    println!("Contains a cycle");
                }
            }
        }
    }

    Ok(())
}
