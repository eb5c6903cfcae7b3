//! Evaluator prompt composition

/// Delimiter placed between ordered step texts
pub const STEP_DELIMITER: &str = " -> ";

/// Diagnostics block used when validation produced no findings
pub const NO_ISSUES_SENTINEL: &str = "No structural issues detected.";

/// Build the evaluator prompt from the ordered steps, structural diagnostics
/// and the description of the expected algorithm.
pub fn compose_prompt(ordered_texts: &[String], diagnostics: &[String], expected: &str) -> String {
    let steps = ordered_texts.join(STEP_DELIMITER);
    let insights = if diagnostics.is_empty() {
        NO_ISSUES_SENTINEL.to_string()
    } else {
        diagnostics.join("\n")
    };

    format!(
        r#"You are a tutor checking a student's flowchart.
The student's flowchart sequence of steps is:
{}

Graph Analysis Insights:
{}

The expected solution is: {}
Does the student's flowchart match the logic of the expected solution?
Identify any structural or logical issues and suggest improvements.
Provide a score out of 100 with justification, on its own line as "Score: <number>"."#,
        steps,
        insights,
        expected.trim()
    )
}
