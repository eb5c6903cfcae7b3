//! In-memory flowchart graph
//!
//! A `Diagram` is a directed multigraph: nodes keep their insertion order and
//! edges are an ordered list, so duplicate edges between the same pair (e.g.
//! decision branches with different conditions) are never collapsed.
//! Construction performs no structural validation; dangling edges are kept
//! for the validator to report.

pub mod document;
pub mod types;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{FlowgradeError, Result};
pub use document::{DiagramDocument, RawEdge, RawNode};
pub use types::{Edge, Node, NodeType};

#[derive(Debug, Clone)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    positions: HashMap<String, usize>,
    /// Successor node positions per node, in edge order (dangling edges skipped)
    successors: Vec<Vec<usize>>,
}

impl Diagram {
    /// Build a diagram from node and edge records.
    ///
    /// Fails only on duplicate node ids.
    pub fn build(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if positions.insert(node.id.clone(), i).is_some() {
                return Err(FlowgradeError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut successors = vec![Vec::new(); nodes.len()];
        for edge in &edges {
            if let (Some(&from), Some(&to)) = (positions.get(&edge.from), positions.get(&edge.to)) {
                successors[from].push(to);
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "diagram_built"
        );

        Ok(Self {
            nodes,
            edges,
            positions,
            successors,
        })
    }

    pub fn from_document(document: DiagramDocument) -> Result<Self> {
        let (nodes, edges) = document.into_records()?;
        Self::build(nodes, edges)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Self::from_document(DiagramDocument::parse(content)?)
    }

    /// Load a diagram document from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FlowgradeError::InputUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.positions.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Insertion position of a node
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Successor positions of the node at `position`, in edge order.
    /// Repeats once per parallel edge.
    pub(crate) fn successors_of(&self, position: usize) -> &[usize] {
        &self.successors[position]
    }

    /// Edges whose source or target names no node
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| !self.contains(&edge.from) || !self.contains(&edge.to))
    }

    pub fn start_nodes(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.node_type.is_start()).collect()
    }

    pub fn end_nodes(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.node_type.is_end()).collect()
    }

    /// The single start node, or `None` when there are zero or several
    pub fn unique_start(&self) -> Option<&Node> {
        match self.start_nodes().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Step texts for the given ids, skipping ids not in the diagram
    pub fn texts_for(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.node(id))
            .map(|node| node.text.clone())
            .collect()
    }
}
