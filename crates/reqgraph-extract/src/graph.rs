//! Canonical requirement graph shared by every decode path.
//!
//! The wire shape is the one the visualizer consumes:
//!
//! ```json
//! {
//!   "nodes": [{"id": "R1", "type": "requirement", "text": "...", "description": "..."}],
//!   "links": [{"source": "C1", "target": "R1", "label": "constrains"}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier chosen by the model for a node (e.g. "R1")
pub type NodeId = String;

/// Category of an extracted node.
///
/// Wire values are normalized when decoded. Values that do not name one of the
/// three categories are kept verbatim in `Unrecognized` so the validator can
/// reject them with the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Something the system must do
    Requirement,
    /// Something that limits how requirements can be met
    Constraint,
    /// An implicit assumption or piece of domain knowledge
    Implicit,
    /// A category string the model invented
    Unrecognized(String),
}

impl NodeKind {
    /// Normalize a free-text category name.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "requirement" | "requirements" | "r" => NodeKind::Requirement,
            "constraint" | "constraints" | "c" => NodeKind::Constraint,
            "implicit" | "implicit_knowledge" | "i" => NodeKind::Implicit,
            _ => NodeKind::Unrecognized(raw.to_string()),
        }
    }

    /// Canonical wire name
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Requirement => "requirement",
            NodeKind::Constraint => "constraint",
            NodeKind::Implicit => "implicit",
            NodeKind::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, NodeKind::Unrecognized(_))
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        NodeKind::parse(&s)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single requirement, constraint or implicit assumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within the graph
    pub id: NodeId,

    /// Node category, `type` on the wire
    #[serde(rename = "type", alias = "kind")]
    pub kind: NodeKind,

    /// Short label
    pub text: String,

    /// Longer elaboration of `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Node {
    /// Build a node, defaulting the description to the label.
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        text: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let text = text.into();
        let description = description.unwrap_or_else(|| text.clone());
        Self {
            id: id.into(),
            kind,
            text,
            description: Some(description),
        }
    }
}

/// A labelled directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    /// Free-form relation tag (e.g. "depends_on", "制約")
    pub label: String,
}

impl Link {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.label, self.target)
    }
}

/// The canonical flat node/link graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Set of declared node ids
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }
}
