use serde::{Serialize, Serializer};
use std::fmt;

/// Flowchart step kind.
///
/// Unrecognized type strings are kept verbatim so they survive into output.
/// The validator treats them as neither start nor end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Start,
    End,
    Process,
    Decision,
    Input,
    Output,
    Other(String),
}

impl NodeType {
    /// Parse a node type string. Matching is exact: "Start" is not a start node.
    pub fn parse(s: &str) -> Self {
        match s {
            "start" => NodeType::Start,
            "end" => NodeType::End,
            "process" => NodeType::Process,
            "decision" => NodeType::Decision,
            "input" => NodeType::Input,
            "output" => NodeType::Output,
            _ => NodeType::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Start => "start",
            NodeType::End => "end",
            NodeType::Process => "process",
            NodeType::Decision => "decision",
            NodeType::Input => "input",
            NodeType::Output => "output",
            NodeType::Other(raw) => raw,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, NodeType::Start)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, NodeType::End)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single flowchart step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub text: String,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            text: text.into(),
        }
    }
}

/// A directed connection between two steps.
///
/// Endpoints are plain ids and may name nodes that do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}
