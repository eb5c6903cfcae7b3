//! Semantic evaluator capability
//!
//! The pipeline only sees the `Evaluator` trait: a prompt goes in, free-form
//! text comes out. Implementations:
//! - `HttpEvaluator`: OpenAI-compatible chat-completions endpoint
//! - `CannedEvaluator`: fixed response (tests, saved responses)
//! - `UnavailableEvaluator`: always fails (offline grading)

pub mod http;

use crate::error::{FlowgradeError, Result};

pub use http::HttpEvaluator;

pub trait Evaluator {
    /// Send a prompt and return the raw response text
    fn evaluate(&self, prompt: &str) -> Result<String>;

    /// Short name for logs and reports
    fn name(&self) -> &str;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, prompt: &str) -> Result<String> {
        (**self).evaluate(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, prompt: &str) -> Result<String> {
        (**self).evaluate(prompt)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Returns the same response for every prompt
#[derive(Debug, Clone)]
pub struct CannedEvaluator {
    response: String,
}

impl CannedEvaluator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Evaluator for CannedEvaluator {
    fn evaluate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Always fails with the given reason
#[derive(Debug, Clone)]
pub struct UnavailableEvaluator {
    reason: String,
}

impl UnavailableEvaluator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Evaluator for UnavailableEvaluator {
    fn evaluate(&self, _prompt: &str) -> Result<String> {
        Err(FlowgradeError::evaluator(&self.reason))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_ignores_prompt() {
        let evaluator = CannedEvaluator::new("Score: 90");
        assert_eq!(evaluator.evaluate("a").unwrap(), "Score: 90");
        assert_eq!(evaluator.evaluate("b").unwrap(), "Score: 90");
    }

    #[test]
    fn test_unavailable_fails() {
        let evaluator = UnavailableEvaluator::new("offline mode");
        let err = evaluator.evaluate("prompt").unwrap_err();
        assert_eq!(err.to_string(), "evaluator error: offline mode");
    }

    #[test]
    fn test_boxed_evaluator_delegates() {
        let boxed: Box<dyn Evaluator> = Box::new(CannedEvaluator::new("ok"));
        assert_eq!(boxed.name(), "canned");
        assert_eq!(boxed.evaluate("x").unwrap(), "ok");
    }
}
