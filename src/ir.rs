use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const START_NODE: &str = "start";
pub const END_NODE: &str = "end";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Nodes on a horizontal line; arcs to actions above, to attributes below.
    #[default]
    Horizontal,
    /// Nodes on a vertical line; arcs to actions left, to attributes right.
    Vertical,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "horizontal" | "LR" => Some(Self::Horizontal),
            "vertical" | "TD" | "TB" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Index of a node inside [`AttackGraph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Action,
    Attribute,
    Other(String),
}

impl NodeKind {
    pub fn from_token(token: &str) -> Self {
        match token {
            "action" => Self::Action,
            "attribute" => Self::Attribute,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => "action",
            Self::Attribute => "attribute",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Sort rank used when ordering ordinary nodes.
    pub(crate) fn rank(kind: Option<&NodeKind>) -> u8 {
        match kind {
            Some(NodeKind::Action) => 0,
            Some(NodeKind::Attribute) => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: Option<NodeKind>,
    pub count: Option<u64>,
    pub sub_type: Option<String>,
    pub weight: Option<f64>,
    pub label: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            count: None,
            sub_type: None,
            weight: None,
            label: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == START_NODE || self.name == END_NODE
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, Some(NodeKind::Action))
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, Some(NodeKind::Attribute))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub count: Option<u64>,
    pub direction: Option<String>,
    pub weight: Option<f64>,
    pub label: Option<String>,
}

impl Edge {
    pub fn is_forward(&self) -> bool {
        self.direction.as_deref() == Some("forward")
    }
}

/// Normalized attack graph: `start` first, `end` last, actions before
/// attributes in between. Edges refer to nodes by index.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    index: HashMap<String, NodeId>,
}

impl AttackGraph {
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.name.clone(), NodeId(idx)))
            .collect();
        Self {
            nodes,
            edges,
            index,
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_index(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn end(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn source(&self, edge: &Edge) -> &Node {
        self.node(edge.source)
    }

    pub fn target(&self, edge: &Edge) -> &Node {
        self.node(edge.target)
    }

    /// Edges leaving `id`, with their indices.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = (usize, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, edge)| edge.source == id)
    }
}
