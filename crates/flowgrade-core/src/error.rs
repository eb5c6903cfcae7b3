//! Error types and exit codes for flowgrade
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (malformed or duplicate diagram input)
//!
//! Structural problems in a flowchart are never errors. They are reported as
//! diagnostics and a depressed structural score.

use thiserror::Error;

/// Exit codes for the flowgrade binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unprocessable diagram input (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during flowgrade operations
#[derive(Error, Debug)]
pub enum FlowgradeError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("malformed diagram: {location} is missing required field '{field}'")]
    MalformedDiagram { location: String, field: String },

    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("failed to read {path}: {reason}")]
    InputUnreadable { path: String, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("evaluator error: {0}")]
    Evaluator(String),

    #[error("{0}")]
    Other(String),
}

impl FlowgradeError {
    /// Create an error for a record missing a required field
    pub fn malformed(location: impl Into<String>, field: &str) -> Self {
        FlowgradeError::MalformedDiagram {
            location: location.into(),
            field: field.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        FlowgradeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an evaluator call that could not complete
    pub fn evaluator(reason: impl std::fmt::Display) -> Self {
        FlowgradeError::Evaluator(reason.to_string())
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FlowgradeError::UnknownFormat(_)
            | FlowgradeError::UsageError(_)
            | FlowgradeError::InvalidValue { .. } => ExitCode::Usage,

            FlowgradeError::MalformedDiagram { .. }
            | FlowgradeError::DuplicateNode { .. }
            | FlowgradeError::InputUnreadable { .. }
            | FlowgradeError::Json(_) => ExitCode::Data,

            FlowgradeError::Io(_)
            | FlowgradeError::Toml(_)
            | FlowgradeError::Evaluator(_)
            | FlowgradeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            FlowgradeError::UnknownFormat(_) => "unknown_format",
            FlowgradeError::UsageError(_) => "usage_error",
            FlowgradeError::InvalidValue { .. } => "invalid_value",
            FlowgradeError::MalformedDiagram { .. } => "malformed_diagram",
            FlowgradeError::DuplicateNode { .. } => "duplicate_node",
            FlowgradeError::InputUnreadable { .. } => "input_unreadable",
            FlowgradeError::Io(_) => "io_error",
            FlowgradeError::Json(_) => "json_error",
            FlowgradeError::Toml(_) => "toml_error",
            FlowgradeError::Evaluator(_) => "evaluator_error",
            FlowgradeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for flowgrade operations
pub type Result<T> = std::result::Result<T, FlowgradeError>;
