//! Score fusion and threshold feedback

use serde::{Deserialize, Serialize};

use crate::score::MAX_SCORE;

pub const STRUCTURAL_FEEDBACK: &str =
    "Check your flowchart structure. Ensure a single start and end node and proper connectivity.";
pub const SEMANTIC_FEEDBACK: &str =
    "The logic could be improved. Ensure that your steps match the intended algorithm more closely.";

/// Relative weight of each axis in the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub structural: f64,
    pub semantic: f64,
}

impl ScoreWeights {
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        structural: 0.6,
        semantic: 0.4,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Final grade for one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    pub structural_score: u8,
    pub semantic_score: u8,
    pub final_score: f64,
    pub feedback: Vec<String>,
}

/// Fuse with the standard 0.6 / 0.4 weighting
pub fn fuse(structural_score: u8, semantic_score: u8) -> GradeResult {
    fuse_weighted(structural_score, semantic_score, ScoreWeights::DEFAULT)
}

pub fn fuse_weighted(structural_score: u8, semantic_score: u8, weights: ScoreWeights) -> GradeResult {
    let final_score = weights.structural * f64::from(structural_score)
        + weights.semantic * f64::from(semantic_score);

    // Independent gates: either, both or neither may fire
    let mut feedback = Vec::new();
    if structural_score < MAX_SCORE {
        feedback.push(STRUCTURAL_FEEDBACK.to_string());
    }
    if semantic_score < MAX_SCORE {
        feedback.push(SEMANTIC_FEEDBACK.to_string());
    }

    GradeResult {
        structural_score,
        semantic_score,
        final_score,
        feedback,
    }
}
