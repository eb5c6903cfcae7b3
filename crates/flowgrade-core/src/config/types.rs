//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Target algorithm used when no assignment description is supplied
pub const DEFAULT_EXPECTED_ALGORITHM: &str = "a loop from 0 to 9 printing each number";

/// Default evaluator endpoint (OpenAI-compatible chat completions)
pub const DEFAULT_EVALUATOR_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const DEFAULT_EVALUATOR_MODEL: &str = "gpt-4o-mini";

/// Environment variable holding the evaluator API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default timeout for evaluator requests
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of retry attempts
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Upper bound on configured retries, from file or environment
pub const RETRY_LIMIT: u32 = 10;

pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Sampling temperature range accepted by chat-completions endpoints
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Grading configuration, injected into the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Weight of the structural score in the final grade
    #[serde(default = "default_structural_weight")]
    pub structural_weight: f64,

    /// Weight of the semantic score in the final grade
    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f64,

    /// Semantic score used when no score can be extracted or the evaluator fails
    #[serde(default = "default_semantic_score")]
    pub default_semantic_score: u8,

    /// Natural-language description of the algorithm the diagram should implement
    #[serde(default = "default_expected_algorithm")]
    pub expected_algorithm: String,

    /// Semantic evaluator settings
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

/// Settings for the HTTP evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Chat-completions endpoint URL
    #[serde(default = "default_evaluator_url")]
    pub url: String,

    #[serde(default = "default_evaluator_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry attempts after the first failed request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            structural_weight: default_structural_weight(),
            semantic_weight: default_semantic_weight(),
            default_semantic_score: default_semantic_score(),
            expected_algorithm: default_expected_algorithm(),
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            url: default_evaluator_url(),
            model: default_evaluator_model(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            temperature: default_temperature(),
        }
    }
}

fn default_structural_weight() -> f64 {
    0.6
}

fn default_semantic_weight() -> f64 {
    0.4
}

fn default_semantic_score() -> u8 {
    crate::score::DEFAULT_SEMANTIC_SCORE
}

fn default_expected_algorithm() -> String {
    DEFAULT_EXPECTED_ALGORITHM.to_string()
}

fn default_evaluator_url() -> String {
    DEFAULT_EVALUATOR_URL.to_string()
}

fn default_evaluator_model() -> String {
    DEFAULT_EVALUATOR_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_max_retries() -> u32 {
    MAX_RETRY_ATTEMPTS
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
