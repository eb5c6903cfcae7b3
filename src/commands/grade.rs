//! `flowgrade grade` command
use std::time::Instant;

use flowgrade_core::config::GradingConfig;
use flowgrade_core::error::Result;
use flowgrade_core::evaluator::{CannedEvaluator, Evaluator, HttpEvaluator, UnavailableEvaluator};
use flowgrade_core::format::OutputFormat;
use flowgrade_core::pipeline::{GradeReport, Grader};

use super::helpers::{load_diagram, print_diagnostics, read_text, resolve_expected};
use crate::cli::{Cli, GradeArgs};

/// Execute the grade command
pub fn execute(cli: &Cli, config: &GradingConfig, args: &GradeArgs, start: Instant) -> Result<()> {
    let diagram = load_diagram(&args.diagram.diagram)?;
    tracing::debug!(
        elapsed = ?start.elapsed(),
        nodes = diagram.node_count(),
        edges = diagram.edge_count(),
        "load_diagram"
    );

    let expected = resolve_expected(&args.expected, config)?;
    let evaluator = select_evaluator(config, args)?;

    let grader = Grader::new(config.clone(), evaluator);
    let report = grader.grade_against(&diagram, &expected);
    tracing::debug!(elapsed = ?start.elapsed(), "grade");

    output_report(cli, &report, args.show_prompt)
}

fn select_evaluator(config: &GradingConfig, args: &GradeArgs) -> Result<Box<dyn Evaluator>> {
    if args.offline {
        return Ok(Box::new(UnavailableEvaluator::new("offline mode")));
    }

    if let Some(path) = &args.response_file {
        let response = read_text(path)?;
        return Ok(Box::new(CannedEvaluator::new(response)));
    }

    Ok(Box::new(HttpEvaluator::new(config.evaluator.clone())))
}

fn output_report(cli: &Cli, report: &GradeReport, show_prompt: bool) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(report)?;
            if show_prompt {
                value["prompt"] = serde_json::Value::String(report.prompt.clone());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Human => {
            if cli.quiet {
                println!("{:.1}", report.grade.final_score);
                return Ok(());
            }

            if show_prompt {
                println!("Prompt:");
                println!("{}", report.prompt);
                println!();
            }

            println!("Structural score: {}", report.grade.structural_score);
            if report.diagnostics.is_empty() {
                println!("No structural issues detected.");
            } else {
                println!("Diagnostics:");
                print_diagnostics(&report.diagnostics);
            }
            println!(
                "Semantic score: {} ({})",
                report.grade.semantic_score, report.semantic.source
            );
            println!("Final score: {:.1}", report.grade.final_score);

            if !report.grade.feedback.is_empty() {
                println!();
                println!("Feedback:");
                for line in &report.grade.feedback {
                    println!("  - {}", line);
                }
            }
        }
    }

    Ok(())
}
