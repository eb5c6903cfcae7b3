//! End-to-end grading pipeline
//!
//! validate → order → compose prompt → evaluate → extract → fuse
//!
//! Everything after diagram construction degrades to a score instead of
//! failing. An evaluator error becomes the default semantic score plus a
//! warning diagnostic on the report.

use std::time::Instant;

use serde::Serialize;

use crate::config::GradingConfig;
use crate::diagram::Diagram;
use crate::error::FlowgradeError;
use crate::evaluator::Evaluator;
use crate::fuse::{fuse_weighted, GradeResult};
use crate::order::{order, Ordering};
use crate::prompt::compose_prompt;
use crate::score::{extract_score_with_default, ExtractedScore};
use crate::trace_time;
use crate::validate::{validate, Diagnostic, ValidationResult};

/// Everything derived from a diagram before the evaluator is called
#[derive(Debug, Clone, Serialize)]
pub struct PreparedPrompt {
    pub validation: ValidationResult,
    pub ordering: Ordering,
    pub steps: Vec<String>,
    pub prompt: String,
}

/// Validate, order and compose the evaluator prompt
pub fn prepare(diagram: &Diagram, expected: &str) -> PreparedPrompt {
    let validation = validate(diagram);
    let ordering = order(diagram);
    let steps = ordering.texts(diagram);
    let prompt = compose_prompt(&steps, &validation.messages(), expected);

    PreparedPrompt {
        validation,
        ordering,
        steps,
        prompt,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluatorOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full result of grading one diagram
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    #[serde(flatten)]
    pub grade: GradeResult,
    /// Structural diagnostics followed by any evaluator diagnostic
    pub diagnostics: Vec<Diagnostic>,
    pub has_cycle: bool,
    pub ordering: Ordering,
    pub steps: Vec<String>,
    pub semantic: ExtractedScore,
    pub evaluator: EvaluatorOutcome,
    #[serde(skip)]
    pub prompt: String,
}

impl GradeReport {
    pub fn diagnostic_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}

/// Grading entry point with injected configuration and evaluator
pub struct Grader<E: Evaluator> {
    config: GradingConfig,
    evaluator: E,
}

impl<E: Evaluator> Grader<E> {
    pub fn new(config: GradingConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    /// Grade against the configured expected algorithm
    pub fn grade(&self, diagram: &Diagram) -> GradeReport {
        self.grade_against(diagram, &self.config.expected_algorithm)
    }

    #[tracing::instrument(skip(self, diagram, expected), fields(evaluator = self.evaluator.name()))]
    pub fn grade_against(&self, diagram: &Diagram, expected: &str) -> GradeReport {
        let start = Instant::now();
        let PreparedPrompt {
            validation,
            ordering,
            steps,
            prompt,
        } = prepare(diagram, expected);
        trace_time!(start, "prepare");

        let mut diagnostics = validation.diagnostics;
        let (response, error) = match self.evaluator.evaluate(&prompt) {
            Ok(response) => (Some(response), None),
            Err(e) => {
                let reason = match e {
                    FlowgradeError::Evaluator(reason) => reason,
                    other => other.to_string(),
                };
                tracing::warn!(reason = %reason, "evaluator_unavailable");
                diagnostics.push(Diagnostic::warning(
                    "evaluator",
                    format!("evaluator unavailable: {}", reason),
                ));
                (None, Some(reason))
            }
        };
        trace_time!(start, "evaluate");

        let default = self.config.default_semantic_score;
        let semantic = match &response {
            Some(text) => extract_score_with_default(text, default),
            None => extract_score_with_default("", default),
        };

        let grade = fuse_weighted(
            validation.structural_score,
            semantic.value,
            self.config.weights(),
        );

        tracing::debug!(
            structural = grade.structural_score,
            semantic = grade.semantic_score,
            source = %semantic.source,
            final_score = grade.final_score,
            "graded"
        );

        GradeReport {
            grade,
            diagnostics,
            has_cycle: validation.has_cycle,
            ordering,
            steps,
            semantic,
            evaluator: EvaluatorOutcome {
                name: self.evaluator.name().to_string(),
                response,
                error,
            },
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::test_support::{diagram, linear_loop};
    use crate::evaluator::{CannedEvaluator, UnavailableEvaluator};
    use crate::order::OrderStrategy;
    use crate::score::ScoreSource;
    use std::cell::RefCell;

    /// Records every prompt it receives
    struct RecordingEvaluator {
        prompts: RefCell<Vec<String>>,
        response: String,
    }

    impl Evaluator for RecordingEvaluator {
        fn evaluate(&self, prompt: &str) -> crate::error::Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(self.response.clone())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_perfect_linear_diagram() {
        let grader = Grader::new(GradingConfig::default(), CannedEvaluator::new("Score: 100"));
        let report = grader.grade(&linear_loop());

        assert_eq!(report.grade.structural_score, 100);
        assert_eq!(report.grade.semantic_score, 100);
        assert!((report.grade.final_score - 100.0).abs() < 1e-9);
        assert!(report.grade.feedback.is_empty());
        assert!(report.diagnostics.is_empty());
        assert_eq!(
            report.steps,
            vec!["Start", "Set i = 0", "Is i < 10?", "Increment i", "Print i", "End"]
        );
    }

    #[test]
    fn test_two_starts_end_to_end() {
        let d = diagram(
            &[
                ("a", "start", "Start A"),
                ("b", "start", "Start B"),
                ("p", "process", "Print i"),
                ("e", "end", "End"),
            ],
            &[("a", "p"), ("b", "p"), ("p", "e")],
        );
        let grader = Grader::new(GradingConfig::default(), CannedEvaluator::new("Score: 80"));
        let report = grader.grade(&d);

        assert_eq!(report.grade.structural_score, 0);
        let start_count = report
            .diagnostics
            .iter()
            .filter(|d| d.category == "start-count")
            .count();
        assert_eq!(start_count, 1);
        assert_eq!(report.ordering.strategy, OrderStrategy::Insertion);
        assert_eq!(report.steps, vec!["Start A", "Start B", "Print i", "End"]);
        assert!((report.grade.final_score - 32.0).abs() < 1e-9);
        assert_eq!(report.grade.feedback.len(), 2);
    }

    #[test]
    fn test_prompt_carries_steps_and_diagnostics() {
        let evaluator = RecordingEvaluator {
            prompts: RefCell::new(Vec::new()),
            response: "Score: 70".to_string(),
        };
        let d = diagram(
            &[("s", "start", "Begin"), ("p", "process", "Count")],
            &[("s", "p")],
        );
        let grader = Grader::new(GradingConfig::default(), &evaluator);
        let report = grader.grade_against(&d, "count to ten");

        let prompts = evaluator.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Begin -> Count"));
        assert!(prompts[0].contains("There should be exactly one end node (found 0)."));
        assert!(prompts[0].contains("count to ten"));
        assert_eq!(report.prompt, prompts[0]);
        assert_eq!(report.semantic.source, ScoreSource::Labeled);
    }

    #[test]
    fn test_evaluator_failure_degrades_to_default() {
        let grader = Grader::new(
            GradingConfig::default(),
            UnavailableEvaluator::new("connection refused"),
        );
        let report = grader.grade(&linear_loop());

        assert_eq!(report.grade.semantic_score, 50);
        assert_eq!(report.semantic.source, ScoreSource::Default);
        assert!((report.grade.final_score - 80.0).abs() < 1e-9);
        assert_eq!(
            report.diagnostic_messages(),
            vec!["evaluator unavailable: connection refused"]
        );
        assert_eq!(report.evaluator.error.as_deref(), Some("connection refused"));
        assert!(report.evaluator.response.is_none());
        // Structural score is unaffected by the evaluator diagnostic
        assert_eq!(report.grade.structural_score, 100);
    }

    #[test]
    fn test_unparseable_response_uses_configured_default() {
        let config = GradingConfig {
            default_semantic_score: 30,
            ..Default::default()
        };
        let grader = Grader::new(config, CannedEvaluator::new("Nice diagram!"));
        let report = grader.grade(&linear_loop());
        assert_eq!(report.grade.semantic_score, 30);
        assert_eq!(report.evaluator.response.as_deref(), Some("Nice diagram!"));
    }

    #[test]
    fn test_custom_weights_applied() {
        let config = GradingConfig {
            structural_weight: 0.5,
            semantic_weight: 0.5,
            ..Default::default()
        };
        let grader = Grader::new(config, CannedEvaluator::new("I'd say 60/100"));
        let report = grader.grade(&linear_loop());
        assert!((report.grade.final_score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_json_shape() {
        let grader = Grader::new(GradingConfig::default(), CannedEvaluator::new("Score: 90"));
        let json = serde_json::to_value(grader.grade(&linear_loop())).unwrap();
        assert_eq!(json["structural_score"], 100);
        assert_eq!(json["semantic_score"], 90);
        assert_eq!(json["ordering"]["strategy"], "topological");
        assert_eq!(json["semantic"]["source"], "labeled");
        assert_eq!(json["evaluator"]["name"], "canned");
        assert!(json.get("prompt").is_none());
    }
}
