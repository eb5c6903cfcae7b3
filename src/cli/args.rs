use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct DiagramArgs {
    /// Diagram JSON file ("-" reads stdin)
    pub diagram: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExpectedArgs {
    /// Description of the expected algorithm (overrides the configured one)
    #[arg(long, conflicts_with = "expected_file")]
    pub expected: Option<String>,

    /// Read the expected algorithm description from a file
    #[arg(long)]
    pub expected_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GradeArgs {
    #[command(flatten)]
    pub diagram: DiagramArgs,

    #[command(flatten)]
    pub expected: ExpectedArgs,

    /// Use a saved evaluator response instead of calling the evaluator
    #[arg(long, conflicts_with = "offline")]
    pub response_file: Option<PathBuf>,

    /// Skip the evaluator; the semantic score falls back to the default
    #[arg(long)]
    pub offline: bool,

    /// Also print the prompt sent to the evaluator
    #[arg(long)]
    pub show_prompt: bool,
}
