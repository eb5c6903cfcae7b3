//! HTTP evaluator for OpenAI-compatible chat-completions endpoints
//!
//! Blocking client with:
//! - a global request timeout
//! - retry with exponential backoff on 5xx and network failures
//! - no retry on 4xx (bad key or request will not improve)

use std::time::Duration;

use ureq::Agent;

use super::Evaluator;
use crate::config::EvaluatorConfig;
use crate::error::{FlowgradeError, Result};

const SYSTEM_PROMPT: &str = "You are a patient tutor grading flowcharts submitted by students. \
Give a brief justification, then end with a line of the form 'Score: <number>' where the number is between 0 and 100.";

const BACKOFF_BASE_MS: u64 = 100;

/// Why a single request attempt failed
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error("request rejected with status {0}")]
    Rejected(u16),

    #[error("server returned status {0}")]
    ServerError(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AttemptError {
    fn is_retryable(&self) -> bool {
        matches!(self, AttemptError::ServerError(_) | AttemptError::Network(_))
    }
}

pub struct HttpEvaluator {
    config: EvaluatorConfig,
    api_key: Option<String>,
    agent: Agent,
    user_agent: String,
}

impl HttpEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();
        let user_agent = format!(
            "flowgrade/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );

        Self {
            config,
            api_key: None,
            agent,
            user_agent,
        }
    }

    /// Use an explicit API key instead of reading the configured environment variable
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                FlowgradeError::evaluator(format!(
                    "{} environment variable must be set",
                    self.config.api_key_env
                ))
            })
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "temperature": self.config.temperature,
        })
    }

    fn attempt(&self, payload: &str, api_key: &str) -> std::result::Result<String, AttemptError> {
        let response = self
            .agent
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .header("User-Agent", &self.user_agent)
            .send(payload);

        let body = match response {
            Ok(mut res) => res
                .body_mut()
                .read_to_string()
                .map_err(|e| AttemptError::Network(e.to_string()))?,
            Err(ureq::Error::StatusCode(code)) if (400..500).contains(&code) => {
                return Err(AttemptError::Rejected(code));
            }
            Err(ureq::Error::StatusCode(code)) => return Err(AttemptError::ServerError(code)),
            Err(e) => return Err(AttemptError::Network(e.to_string())),
        };

        extract_content(&body)
    }
}

/// Delay before retry `attempt` (1-based): 100ms doubling, saturating
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2_u64.checked_pow(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(factor))
}

/// Pull the first choice's message content out of a chat-completions response
fn extract_content(body: &str) -> std::result::Result<String, AttemptError> {
    let response_json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AttemptError::InvalidResponse(e.to_string()))?;

    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| AttemptError::InvalidResponse("missing choices[0].message.content".into()))
}

impl Evaluator for HttpEvaluator {
    #[tracing::instrument(skip(self, prompt), fields(url = %self.config.url, model = %self.config.model))]
    fn evaluate(&self, prompt: &str) -> Result<String> {
        let api_key = self.resolve_api_key()?;
        let payload = serde_json::to_string(&self.request_body(prompt))?;

        let mut last_error = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = backoff_delay(attempt);
                tracing::warn!(attempt, backoff_ms = backoff.as_millis() as u64, "evaluator_retry");
                std::thread::sleep(backoff);
            }

            match self.attempt(&payload, &api_key) {
                Ok(content) => {
                    tracing::debug!(attempt, chars = content.len(), "evaluator_response");
                    return Ok(content);
                }
                Err(e) if e.is_retryable() => {
                    last_error = Some(e);
                }
                Err(e) => return Err(FlowgradeError::evaluator(e)),
            }
        }

        Err(FlowgradeError::evaluator(
            last_error.map_or_else(|| "no attempts made".to_string(), |e| e.to_string()),
        ))
    }

    fn name(&self) -> &str {
        "http"
    }
}
