use crate::ir::{NodeId, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tooltip {
    pub text: String,
    /// Category prefix of the node name (`action`, `attribute`), if any.
    pub category: Option<String>,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Outline {
    pub radius: f64,
    pub dashed: bool,
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: String,
    pub outline: Option<Outline>,
    pub tooltip: Tooltip,
    pub count_label: String,
    pub sentinel: bool,
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub index: usize,
    pub source: NodeId,
    pub target: NodeId,
    pub center: (f64, f64),
    /// Band outline in absolute coordinates.
    pub points: Vec<(f64, f64)>,
    /// Smoothed, closed SVG path for `points`.
    pub path: String,
    pub opacity: f64,
    pub towards_action: bool,
}

#[derive(Debug, Clone)]
pub struct Caption {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    pub node_radius: f64,
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub captions: Vec<Caption>,
}

impl Layout {
    pub fn node(&self, id: NodeId) -> &NodeLayout {
        &self.nodes[id.0]
    }
}
