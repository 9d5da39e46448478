//! Highlight states for the arc diagram.
//!
//! Each state is a full styling of every arc and node, computed up front from
//! the layout so the renderer (or the embedded hover script) only applies it.

use crate::config::LayoutConfig;
use crate::error::GraphError;
use crate::ir::{AttackGraph, NodeId};
use crate::layout::Layout;
use crate::theme::Theme;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ArcStyle {
    pub opacity: f64,
    /// Replaces the theme's arc fill when set.
    pub fill: Option<String>,
    /// Emphasized by the state rather than dimmed or left at rest.
    pub lit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub fill: String,
    pub tooltip_visible: bool,
    pub count_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightState {
    pub arcs: Vec<ArcStyle>,
    pub nodes: Vec<NodeStyle>,
}

/// Styling with nothing hovered: arcs at their count opacity, nodes coloured,
/// every tooltip shown.
pub fn rest_state(layout: &Layout) -> HighlightState {
    HighlightState {
        arcs: layout
            .edges
            .iter()
            .map(|edge| ArcStyle {
                opacity: edge.opacity,
                fill: None,
                lit: false,
            })
            .collect(),
        nodes: layout
            .nodes
            .iter()
            .map(|node| NodeStyle {
                fill: node.fill.clone(),
                tooltip_visible: true,
                count_visible: false,
            })
            .collect(),
    }
}

/// Styling while `hovered` is under the pointer: its outgoing arcs stand out,
/// everything else fades, and only the hovered node and the targets of its
/// arcs keep their colour and tooltip.
pub fn hover_state(
    graph: &AttackGraph,
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    hovered: NodeId,
) -> HighlightState {
    let boost = config.hover_opacity_boost as f64;
    let dim = config.hover_dim_opacity as f64;

    let mut lit_nodes = HashSet::from([hovered]);
    let mut arcs: Vec<ArcStyle> = layout
        .edges
        .iter()
        .map(|_| ArcStyle {
            opacity: dim,
            fill: None,
            lit: false,
        })
        .collect();
    for (idx, edge) in graph.outgoing(hovered) {
        arcs[idx].opacity = layout.edges[idx].opacity + boost;
        arcs[idx].lit = true;
        lit_nodes.insert(edge.target);
    }

    let nodes = layout
        .nodes
        .iter()
        .map(|node| {
            let lit = lit_nodes.contains(&node.id);
            NodeStyle {
                fill: if lit && !node.sentinel {
                    node.fill.clone()
                } else {
                    theme.sentinel_fill.clone()
                },
                tooltip_visible: lit,
                count_visible: node.id == hovered,
            }
        })
        .collect();

    HighlightState { arcs, nodes }
}

/// Resolves a node sequence into consecutive `(source, target)` steps.
///
/// Every name must exist in the graph; a name that does not is reported
/// against the step it belongs to (the first step for the first name).
pub fn path_steps<S: AsRef<str>>(
    graph: &AttackGraph,
    names: &[S],
) -> Result<Vec<(NodeId, NodeId)>, GraphError> {
    let ids = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.as_ref();
            graph
                .node_index(name)
                .ok_or_else(|| GraphError::UnresolvedEndpoint {
                    edge: idx.saturating_sub(1),
                    name: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ids.len() < 2 {
        return Err(GraphError::PathTooShort { len: ids.len() });
    }
    Ok(ids.windows(2).map(|pair| (pair[0], pair[1])).collect())
}

/// Styling that marks an incident path given as node names: arcs matching a
/// step turn to the highlight fill, all others fade to a fraction of their
/// opacity.
pub fn path_highlight<S: AsRef<str>>(
    graph: &AttackGraph,
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    path: &[S],
) -> Result<HighlightState, GraphError> {
    let wanted: HashSet<(NodeId, NodeId)> = path_steps(graph, path)?.into_iter().collect();

    let factor = config.path_dim_factor as f64;
    let mut on_path = HashSet::new();
    let arcs = graph
        .edges
        .iter()
        .zip(&layout.edges)
        .map(|(edge, shape)| {
            if wanted.contains(&(edge.source, edge.target)) {
                on_path.insert(edge.source);
                on_path.insert(edge.target);
                ArcStyle {
                    opacity: shape.opacity,
                    fill: Some(theme.highlight_fill.clone()),
                    lit: true,
                }
            } else {
                ArcStyle {
                    opacity: shape.opacity * factor,
                    fill: None,
                    lit: false,
                }
            }
        })
        .collect();

    let nodes = layout
        .nodes
        .iter()
        .map(|node| NodeStyle {
            fill: node.fill.clone(),
            tooltip_visible: on_path.contains(&node.id),
            count_visible: false,
        })
        .collect();

    Ok(HighlightState { arcs, nodes })
}
