//! CLI commands for flowgrade

pub mod check;
pub mod config;
pub mod dispatch;
pub mod grade;
pub mod helpers;
pub mod order;
pub mod prompt;
