//! Semantic score extraction from free-form evaluator text
//!
//! Tiers, first match wins:
//! 1. a `Score` label followed by optional `:`/whitespace and digits
//! 2. an inline `<digits>/100` fraction
//! 3. the configured default
//!
//! Parsed values above 100 are clamped to 100, including digit runs too long
//! to fit in an integer.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const DEFAULT_SEMANTIC_SCORE: u8 = 50;
pub const MAX_SCORE: u8 = 100;

static LABELED_RE: OnceLock<Option<Regex>> = OnceLock::new();
static FRACTION_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn labeled_re() -> Option<&'static Regex> {
    LABELED_RE
        .get_or_init(|| Regex::new(r"Score[:\s]*([0-9]+)").ok())
        .as_ref()
}

fn fraction_re() -> Option<&'static Regex> {
    FRACTION_RE
        .get_or_init(|| Regex::new(r"([0-9]+)/100").ok())
        .as_ref()
}

/// Which extraction tier produced the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Labeled,
    Fraction,
    Default,
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Labeled => write!(f, "labeled"),
            ScoreSource::Fraction => write!(f, "fraction"),
            ScoreSource::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedScore {
    /// Score in [0, 100]
    pub value: u8,
    pub source: ScoreSource,
    /// Value as written in the text, before clamping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<u64>,
}

impl ExtractedScore {
    pub fn was_clamped(&self) -> bool {
        self.raw.is_some_and(|raw| raw > u64::from(MAX_SCORE))
    }
}

/// Extract a score using the standard default of 50
pub fn extract_score(text: &str) -> u8 {
    extract_score_with_default(text, DEFAULT_SEMANTIC_SCORE).value
}

/// Extract a score, falling back to `default` when no pattern matches
pub fn extract_score_with_default(text: &str, default: u8) -> ExtractedScore {
    let tiers = [
        (labeled_re(), ScoreSource::Labeled),
        (fraction_re(), ScoreSource::Fraction),
    ];

    for (re, source) in tiers {
        let Some(re) = re else { continue };
        if let Some(digits) = re.captures(text).and_then(|caps| caps.get(1)) {
            let raw = digits.as_str().parse::<u64>().unwrap_or(u64::MAX);
            let extracted = ExtractedScore {
                value: clamp_score(raw),
                source,
                raw: Some(raw),
            };
            if extracted.was_clamped() {
                tracing::debug!(raw, "score_clamped");
            }
            return extracted;
        }
    }

    ExtractedScore {
        value: default.min(MAX_SCORE),
        source: ScoreSource::Default,
        raw: None,
    }
}

fn clamp_score(raw: u64) -> u8 {
    u8::try_from(raw.min(u64::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_score() {
        assert_eq!(extract_score("Score: 87, good job"), 87);
        let extracted = extract_score_with_default("Score: 87, good job", 50);
        assert_eq!(extracted.source, ScoreSource::Labeled);
        assert_eq!(extracted.raw, Some(87));
    }

    #[test]
    fn test_fraction_score() {
        assert_eq!(extract_score("I'd give this a 72/100"), 72);
        assert_eq!(
            extract_score_with_default("I'd give this a 72/100", 50).source,
            ScoreSource::Fraction
        );
    }

    #[test]
    fn test_default_when_no_pattern() {
        assert_eq!(extract_score("Looks reasonable overall"), 50);
        let extracted = extract_score_with_default("Looks reasonable overall", 35);
        assert_eq!(extracted.value, 35);
        assert_eq!(extracted.source, ScoreSource::Default);
        assert!(extracted.raw.is_none());
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(extract_score("Score: 150"), 100);
        assert_eq!(extract_score("A generous 150/100!"), 100);
        let extracted = extract_score_with_default("Score: 150", 50);
        assert_eq!(extracted.raw, Some(150));
        assert!(extracted.was_clamped());
    }

    #[test]
    fn test_huge_digit_run_clamped() {
        assert_eq!(extract_score("Score: 99999999999999999999999"), 100);
    }

    #[test]
    fn test_label_wins_over_fraction() {
        assert_eq!(extract_score("Roughly 40/100 at first glance.\nScore: 65"), 65);
    }

    #[test]
    fn test_label_variants() {
        assert_eq!(extract_score("Final Score:92"), 92);
        assert_eq!(extract_score("Score 70 because the loop bound is off"), 70);
        assert_eq!(extract_score("Score:\n  88"), 88);
    }

    #[test]
    fn test_label_is_case_sensitive() {
        // lowercase label falls through to the fraction tier
        assert_eq!(extract_score("score: 30, i.e. 30/100"), 30);
        assert_eq!(
            extract_score_with_default("score: 30", 50).source,
            ScoreSource::Default
        );
    }

    #[test]
    fn test_zero_score() {
        assert_eq!(extract_score("Score: 0"), 0);
    }
}
