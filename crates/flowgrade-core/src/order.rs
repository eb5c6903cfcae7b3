//! Canonical step ordering
//!
//! Produces the linear reading of a diagram that is shown to the evaluator.
//! Degrades instead of failing:
//! - no single start node: raw insertion order (every node)
//! - single start, acyclic: topological order (every node)
//! - single start, cyclic: depth-first preorder from the start
//!   (nodes unreachable from the start are omitted)

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::diagram::Diagram;
use crate::trace_time;

/// How an ordering was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStrategy {
    Topological,
    DepthFirst,
    Insertion,
}

impl fmt::Display for OrderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStrategy::Topological => write!(f, "topological"),
            OrderStrategy::DepthFirst => write!(f, "depth-first"),
            OrderStrategy::Insertion => write!(f, "insertion"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ordering {
    pub strategy: OrderStrategy,
    pub node_ids: Vec<String>,
}

impl Ordering {
    /// Step texts in order
    pub fn texts(&self, diagram: &Diagram) -> Vec<String> {
        diagram.texts_for(&self.node_ids)
    }
}

/// Derive the canonical ordering of a diagram. Never fails.
#[tracing::instrument(skip(diagram), fields(nodes = diagram.node_count()))]
pub fn order(diagram: &Diagram) -> Ordering {
    let start = Instant::now();

    let (strategy, positions) = match diagram.unique_start() {
        None => (
            OrderStrategy::Insertion,
            (0..diagram.node_count()).collect(),
        ),
        Some(start_node) => match topological_positions(diagram) {
            Some(positions) => (OrderStrategy::Topological, positions),
            None => {
                let root = diagram.position(&start_node.id).unwrap_or_default();
                (OrderStrategy::DepthFirst, dfs_preorder(diagram, root))
            }
        },
    };

    let nodes = diagram.nodes();
    let node_ids: Vec<String> = positions.into_iter().map(|i| nodes[i].id.clone()).collect();

    tracing::debug!(strategy = %strategy, ordered = node_ids.len(), "ordered");
    trace_time!(start, "order");

    Ordering { strategy, node_ids }
}

/// Topological order by node position, or `None` if the graph has a cycle.
///
/// Kahn's algorithm; among ready nodes the earliest-inserted is taken first,
/// so the result depends only on node order and the edge multiset.
pub fn topological_positions(diagram: &Diagram) -> Option<Vec<usize>> {
    let n = diagram.node_count();
    let mut in_degree = vec![0usize; n];
    for node in 0..n {
        for &next in diagram.successors_of(node) {
            in_degree[next] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&i| in_degree[i] == 0)
        .map(Reverse)
        .collect();
    let mut sorted = Vec::with_capacity(n);

    while let Some(Reverse(node)) = ready.pop() {
        sorted.push(node);
        for &next in diagram.successors_of(node) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    (sorted.len() == n).then_some(sorted)
}

/// Depth-first preorder from `root`, successors in edge order.
/// Each reachable node appears once.
pub fn dfs_preorder(diagram: &Diagram, root: usize) -> Vec<usize> {
    let mut visited = vec![false; diagram.node_count()];
    let mut preorder = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        preorder.push(node);

        for &next in diagram.successors_of(node).iter().rev() {
            if !visited[next] {
                stack.push(next);
            }
        }
    }

    preorder
}
