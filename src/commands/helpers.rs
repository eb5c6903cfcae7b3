//! Helper functions shared across commands

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use flowgrade_core::config::GradingConfig;
use flowgrade_core::diagram::Diagram;
use flowgrade_core::error::{FlowgradeError, Result};
use flowgrade_core::validate::{Diagnostic, Severity};

use crate::cli::ExpectedArgs;

/// Load a diagram from a file, or from stdin when the path is "-"
pub fn load_diagram(path: &Path) -> Result<Diagram> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| FlowgradeError::InputUnreadable {
                path: "<stdin>".to_string(),
                reason: e.to_string(),
            })?;
        return Diagram::from_json(&content);
    }

    Diagram::from_path(path)
}

/// Read a whole text file, mapping failures to an input error
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| FlowgradeError::InputUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Expected algorithm from --expected, --expected-file, or the configuration
pub fn resolve_expected(args: &ExpectedArgs, config: &GradingConfig) -> Result<String> {
    let expected = match (&args.expected, &args.expected_file) {
        (Some(text), _) => text.trim().to_string(),
        (None, Some(path)) => read_text(path)?.trim().to_string(),
        (None, None) => return Ok(config.expected_algorithm.clone()),
    };

    if expected.is_empty() {
        return Err(FlowgradeError::UsageError(
            "expected algorithm description must not be empty".to_string(),
        ));
    }

    Ok(expected)
}

/// Print diagnostics in the human format, one per line
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let severity_prefix = match diagnostic.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        println!(
            "  {} [{}] {}",
            severity_prefix, diagnostic.category, diagnostic.message
        );
    }
}
