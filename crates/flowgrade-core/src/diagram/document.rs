//! Raw diagram document as submitted by the learner
//!
//! Every field is optional at the serde level so a missing field surfaces as
//! a `MalformedDiagram` error naming the record, rather than a serde message.

use serde::Deserialize;

use super::types::{Edge, Node, NodeType};
use crate::error::{FlowgradeError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagramDocument {
    #[serde(default)]
    pub nodes: Option<Vec<RawNode>>,
    #[serde(default)]
    pub edges: Option<Vec<RawEdge>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEdge {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl DiagramDocument {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Convert raw records into typed nodes and edges, in document order
    pub fn into_records(self) -> Result<(Vec<Node>, Vec<Edge>)> {
        let raw_nodes = self
            .nodes
            .ok_or_else(|| FlowgradeError::malformed("diagram", "nodes"))?;
        let raw_edges = self
            .edges
            .ok_or_else(|| FlowgradeError::malformed("diagram", "edges"))?;

        let nodes = raw_nodes
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_node(i))
            .collect::<Result<Vec<_>>>()?;
        let edges = raw_edges
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_edge(i))
            .collect::<Result<Vec<_>>>()?;

        Ok((nodes, edges))
    }
}

impl RawNode {
    fn into_node(self, index: usize) -> Result<Node> {
        let location = || format!("node #{}", index);
        let id = self
            .id
            .ok_or_else(|| FlowgradeError::malformed(location(), "id"))?;
        let node_type = self
            .node_type
            .ok_or_else(|| FlowgradeError::malformed(location(), "type"))?;
        let text = self
            .text
            .ok_or_else(|| FlowgradeError::malformed(location(), "text"))?;

        Ok(Node::new(id, NodeType::parse(&node_type), text))
    }
}

impl RawEdge {
    fn into_edge(self, index: usize) -> Result<Edge> {
        let location = || format!("edge #{}", index);
        let from = self
            .from
            .ok_or_else(|| FlowgradeError::malformed(location(), "from"))?;
        let to = self
            .to
            .ok_or_else(|| FlowgradeError::malformed(location(), "to"))?;

        Ok(Edge {
            from,
            to,
            condition: self.condition,
        })
    }
}
