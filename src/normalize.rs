use crate::error::GraphError;
use crate::ir::{AttackGraph, Edge, END_NODE, Node, NodeId, NodeKind, START_NODE};
use crate::parser::{DataEntry, GraphDescription, RawEdge, RawNode};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Store edges whose direction is not `forward` with source and target swapped.
    pub reverse_backward_edges: bool,
}

/// Builds the ordered node list and resolved edge list from a raw description.
pub fn normalize(
    description: &GraphDescription,
    options: NormalizeOptions,
) -> Result<AttackGraph, GraphError> {
    let raw = description.graph();

    let mut seen = HashSet::new();
    let mut start = None;
    let mut end = None;
    let mut ordinary = Vec::with_capacity(raw.nodes.len());
    for raw_node in &raw.nodes {
        if !seen.insert(raw_node.id.as_str()) {
            return Err(GraphError::DuplicateNode {
                name: raw_node.id.clone(),
            });
        }
        let node = parse_node(raw_node);
        match node.name.as_str() {
            START_NODE => start = Some(node),
            END_NODE => end = Some(node),
            _ => ordinary.push(node),
        }
    }

    // sort_by_key is stable, so equal kinds keep their input order
    ordinary.sort_by_key(|node| NodeKind::rank(node.kind.as_ref()));

    let start = start.ok_or_else(|| GraphError::MissingSentinel {
        name: START_NODE.to_string(),
    })?;
    let end = end.ok_or_else(|| GraphError::MissingSentinel {
        name: END_NODE.to_string(),
    })?;

    let mut nodes = Vec::with_capacity(ordinary.len() + 2);
    nodes.push(start);
    nodes.extend(ordinary);
    nodes.push(end);

    let lookup: HashMap<&str, NodeId> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.name.as_str(), NodeId(idx)))
        .collect();

    let mut edges = Vec::with_capacity(raw.edges.len());
    for (idx, raw_edge) in raw.edges.iter().enumerate() {
        let source = resolve(&lookup, idx, &raw_edge.source)?;
        let target = resolve(&lookup, idx, &raw_edge.target)?;
        if source == target {
            tracing::debug!(edge = idx, node = %raw_edge.source, "dropping self-loop");
            continue;
        }
        let mut edge = parse_edge(raw_edge, source, target);
        if options.reverse_backward_edges && !edge.is_forward() {
            std::mem::swap(&mut edge.source, &mut edge.target);
        }
        edges.push(edge);
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "normalized attack graph"
    );
    Ok(AttackGraph::from_parts(nodes, edges))
}

fn resolve(
    lookup: &HashMap<&str, NodeId>,
    edge: usize,
    name: &str,
) -> Result<NodeId, GraphError> {
    lookup
        .get(name)
        .copied()
        .ok_or_else(|| GraphError::UnresolvedEndpoint {
            edge,
            name: name.to_string(),
        })
}

fn parse_node(raw: &RawNode) -> Node {
    let mut node = Node::new(raw.id.clone());
    for datum in &raw.data {
        let Some(text) = datum.text() else {
            continue;
        };
        match datum.key.as_str() {
            "d0" => node.count = parse_count(datum, &text),
            "d1" => node.kind = Some(NodeKind::from_token(&text)),
            "d2" => node.sub_type = Some(text),
            "d3" => node.weight = parse_weight(datum, &text),
            "d4" => node.label = Some(text),
            _ => {}
        }
    }
    node
}

fn parse_edge(raw: &RawEdge, source: NodeId, target: NodeId) -> Edge {
    let mut edge = Edge {
        source,
        target,
        count: None,
        direction: None,
        weight: None,
        label: None,
    };
    for datum in &raw.data {
        let Some(text) = datum.text() else {
            continue;
        };
        match datum.key.as_str() {
            "d5" => edge.count = parse_count(datum, &text),
            "d6" => edge.direction = Some(text),
            "d7" => edge.weight = parse_weight(datum, &text),
            "d8" => edge.label = Some(text),
            _ => {}
        }
    }
    edge
}

fn parse_count(datum: &DataEntry, text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Some(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => {
            Some(value as u64)
        }
        _ => {
            tracing::debug!(key = %datum.key, value = %text, "ignoring non-integer count");
            None
        }
    }
}

fn parse_weight(datum: &DataEntry, text: &str) -> Option<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::debug!(key = %datum.key, value = %text, "ignoring non-numeric weight");
            None
        }
    }
}
