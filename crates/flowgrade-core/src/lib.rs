//! Flowgrade Core Library
//!
//! Grades learner flowcharts: structural validation, canonical step ordering,
//! evaluator prompt composition, score extraction and score fusion.

pub mod config;
pub mod diagram;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod fuse;
pub mod logging;
pub mod order;
pub mod pipeline;
pub mod prompt;
pub mod score;
pub mod validate;

pub use diagram::{Diagram, Edge, Node, NodeType};
pub use error::{FlowgradeError, Result};
pub use evaluator::Evaluator;
pub use pipeline::{GradeReport, Grader};
