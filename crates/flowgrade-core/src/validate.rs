//! Structural validation of a flowchart
//!
//! Checks run in a fixed order and all of them run, so the diagnostic list is
//! exhaustive and deterministic for a given diagram:
//! 1. exactly one start node
//! 2. exactly one end node
//! 3. every node reachable from the start (only when 1 and 2 hold)
//! 4. cycle description (only when 1 and 2 hold; informational)
//! 5. dangling edges
//!
//! The structural score is binary: any error-severity diagnostic forces it to 0.
//! Dangling edges are errors, so an edge naming an unknown node fails an
//! otherwise sound diagram.

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::diagram::Diagram;
use crate::trace_time;

pub const STRUCTURAL_PASS: u8 = 100;
pub const STRUCTURAL_FAIL: u8 = 0;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational - does not affect the structural score
    Warning,
    /// Structural defect - forces the structural score to 0
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single structural finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Finding category (e.g., "start-count", "unreachable-node", "cycle")
    pub category: String,
    /// Human-readable description
    pub message: String,
    /// Node the finding concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl Diagnostic {
    pub fn error(category: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category: category.to_string(),
            message: message.into(),
            node_id: None,
        }
    }

    pub fn warning(category: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category: category.to_string(),
            message: message.into(),
            node_id: None,
        }
    }

    pub fn for_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of structural validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub structural_score: u8,
    pub diagnostics: Vec<Diagnostic>,
    pub has_cycle: bool,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.structural_score == STRUCTURAL_PASS
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// Diagnostic messages in check order
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}

/// Validate the structure of a diagram
#[tracing::instrument(skip(diagram), fields(nodes = diagram.node_count(), edges = diagram.edge_count()))]
pub fn validate(diagram: &Diagram) -> ValidationResult {
    let start = Instant::now();
    let mut diagnostics = Vec::new();

    let starts = diagram.start_nodes();
    let ends = diagram.end_nodes();

    if starts.len() != 1 {
        diagnostics.push(Diagnostic::error(
            "start-count",
            format!(
                "There should be exactly one start node (found {}).",
                starts.len()
            ),
        ));
    }

    if ends.len() != 1 {
        diagnostics.push(Diagnostic::error(
            "end-count",
            format!(
                "There should be exactly one end node (found {}).",
                ends.len()
            ),
        ));
    }

    let cycle = find_cycle(diagram);

    match (starts.as_slice(), ends.as_slice()) {
        ([start_node], [end_node]) => {
            diagnostics.extend(reachability_diagnostics(diagram, &start_node.id, &end_node.id));

            if let Some(path) = &cycle {
                diagnostics.push(
                    Diagnostic::warning(
                        "cycle",
                        format!("Cycle detected: {}", path.join(" -> ")),
                    )
                    .for_node(&path[0]),
                );
            }
        }
        _ => {
            diagnostics.push(Diagnostic::warning(
                "checks-skipped",
                "Reachability and cycle checks skipped: the diagram has no single start and end node.",
            ));
        }
    }

    for edge in diagram.dangling_edges() {
        let missing = if diagram.contains(&edge.from) {
            &edge.to
        } else {
            &edge.from
        };
        diagnostics.push(
            Diagnostic::error(
                "dangling-edge",
                format!(
                    "Edge '{}' -> '{}' references unknown node '{}'.",
                    edge.from, edge.to, missing
                ),
            )
            .for_node(missing),
        );
    }

    let structural_score = if diagnostics.iter().any(Diagnostic::is_error) {
        STRUCTURAL_FAIL
    } else {
        STRUCTURAL_PASS
    };

    let result = ValidationResult {
        structural_score,
        diagnostics,
        has_cycle: cycle.is_some(),
    };

    tracing::debug!(
        structural_score = result.structural_score,
        errors = result.error_count(),
        warnings = result.warning_count(),
        has_cycle = result.has_cycle,
        "validated"
    );
    trace_time!(start, "validate");

    result
}

/// One error per node unreachable from the start, then one if the end is unreachable
fn reachability_diagnostics(diagram: &Diagram, start_id: &str, end_id: &str) -> Vec<Diagnostic> {
    let reachable = reachable_from(diagram, start_id);
    let mut diagnostics: Vec<Diagnostic> = diagram
        .nodes()
        .iter()
        .zip(&reachable)
        .filter(|(_, seen)| !**seen)
        .map(|(node, _)| {
            Diagnostic::error(
                "unreachable-node",
                format!("Node '{}' is not reachable from the start node.", node.id),
            )
            .for_node(&node.id)
        })
        .collect();

    let end_reachable = diagram.position(end_id).is_some_and(|i| reachable[i]);
    if !end_reachable {
        diagnostics.push(
            Diagnostic::error(
                "unreachable-end",
                format!("End node '{}' is not reachable from the start node.", end_id),
            )
            .for_node(end_id),
        );
    }

    diagnostics
}

/// Reachability flags per node position, by breadth-first search from `start_id`
pub fn reachable_from(diagram: &Diagram, start_id: &str) -> Vec<bool> {
    let mut visited = vec![false; diagram.node_count()];
    let Some(start) = diagram.position(start_id) else {
        return visited;
    };

    let mut queue: VecDeque<usize> = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in diagram.successors_of(current) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    visited
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Find one directed cycle, returned as the node ids along it with the first
/// id repeated at the end. Roots are tried in insertion order and successors
/// in edge order, so the reported cycle is stable.
pub fn find_cycle(diagram: &Diagram) -> Option<Vec<String>> {
    let n = diagram.node_count();
    let mut marks = vec![Mark::Unvisited; n];

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        // (node, index of the next successor to explore)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::OnStack;

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let successors = diagram.successors_of(node);
            if frame.1 < successors.len() {
                let child = successors[frame.1];
                frame.1 += 1;
                match marks[child] {
                    Mark::Unvisited => {
                        marks[child] = Mark::OnStack;
                        stack.push((child, 0));
                    }
                    Mark::OnStack => {
                        let from = stack.iter().position(|&(id, _)| id == child).unwrap_or(0);
                        let nodes = diagram.nodes();
                        let mut path: Vec<String> = stack[from..]
                            .iter()
                            .map(|&(id, _)| nodes[id].id.clone())
                            .collect();
                        path.push(nodes[child].id.clone());
                        return Some(path);
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    None
}
