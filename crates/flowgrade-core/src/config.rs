//! Grading configuration for flowgrade
//!
//! Configuration is read from TOML (`--config`, else `flowgrade.toml` in the
//! working directory, else built-in defaults), then evaluator settings may be
//! overridden from the environment.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{FlowgradeError, Result};
use crate::fuse::ScoreWeights;
use crate::score::MAX_SCORE;

pub use types::{
    EvaluatorConfig, GradingConfig, DEFAULT_API_KEY_ENV, DEFAULT_EVALUATOR_MODEL,
    DEFAULT_EVALUATOR_URL, DEFAULT_EXPECTED_ALGORITHM, DEFAULT_TIMEOUT_SECONDS,
    MAX_RETRY_ATTEMPTS, RETRY_LIMIT, TEMPERATURE_RANGE,
};

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE: &str = "flowgrade.toml";

impl GradingConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FlowgradeError::InputUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: GradingConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, `flowgrade.toml` in `cwd` is
    /// used when present. Environment overrides are applied and the result
    /// is validated.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = cwd.join(CONFIG_FILE);
                if candidate.exists() {
                    tracing::debug!(path = %candidate.display(), "config_discovered");
                    Self::load(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply evaluator overrides from an environment-like lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.is_empty());

        if let Some(url) = non_empty("FLOWGRADE_EVALUATOR_URL") {
            self.evaluator.url = url;
        }

        if let Some(model) = non_empty("FLOWGRADE_EVALUATOR_MODEL") {
            self.evaluator.model = model;
        }

        if let Some(timeout) = non_empty("FLOWGRADE_EVALUATOR_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                self.evaluator.timeout_seconds = seconds.clamp(5, 300);
            }
        }

        if let Some(retries) = non_empty("FLOWGRADE_EVALUATOR_RETRIES") {
            if let Ok(count) = retries.parse::<u32>() {
                self.evaluator.max_retries = count.min(RETRY_LIMIT);
            }
        }
    }

    /// Reject weights that are negative or do not sum to 1.0, defaults above 100,
    /// and evaluator settings outside their bounds
    pub fn validate(&self) -> Result<()> {
        if self.structural_weight < 0.0 || !self.structural_weight.is_finite() {
            return Err(FlowgradeError::invalid_value(
                "structural_weight",
                self.structural_weight,
            ));
        }
        if self.semantic_weight < 0.0 || !self.semantic_weight.is_finite() {
            return Err(FlowgradeError::invalid_value(
                "semantic_weight",
                self.semantic_weight,
            ));
        }

        let total_weight = self.structural_weight + self.semantic_weight;
        if (total_weight - 1.0).abs() > 0.01 {
            return Err(FlowgradeError::invalid_value(
                "score weights",
                format!("must sum to 1.0, got {}", total_weight),
            ));
        }

        if self.default_semantic_score > MAX_SCORE {
            return Err(FlowgradeError::invalid_value(
                "default_semantic_score",
                self.default_semantic_score,
            ));
        }

        if self.evaluator.timeout_seconds == 0 {
            return Err(FlowgradeError::invalid_value("evaluator.timeout_seconds", 0));
        }

        if self.evaluator.max_retries > RETRY_LIMIT {
            return Err(FlowgradeError::invalid_value(
                "evaluator.max_retries",
                format!("{} (at most {})", self.evaluator.max_retries, RETRY_LIMIT),
            ));
        }

        if !TEMPERATURE_RANGE.contains(&self.evaluator.temperature) {
            return Err(FlowgradeError::invalid_value(
                "evaluator.temperature",
                self.evaluator.temperature,
            ));
        }

        Ok(())
    }

    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            structural: self.structural_weight,
            semantic: self.semantic_weight,
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FlowgradeError::Other(format!("failed to serialize config: {}", e)))
    }
}
