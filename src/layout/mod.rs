pub mod arc;
pub mod linear;
pub mod spline;
pub(crate) mod types;
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::{AttackGraph, Node, NodeId, Orientation};
use crate::scale::Scales;
use crate::theme::Theme;
use arc::{ArcEndpoints, ArcPoint, arc_polygon};
use linear::axis_positions;
use spline::basis_path;

/// Places nodes on one line and shapes every edge as an arc band.
pub fn compute_layout(
    graph: &AttackGraph,
    scales: &Scales,
    theme: &Theme,
    config: &LayoutConfig,
) -> Layout {
    let width = config.width.max(1.0) as f64;
    let height = config.height.max(1.0) as f64;
    let margin = config.margin as f64;
    let radius = config.effective_node_radius() as f64;

    // Both orientations lay nodes over the canvas height so the arcs keep
    // their aspect when the plot is rotated.
    let positions = axis_positions(graph.nodes.len(), margin, height - margin);
    let offset = width / 2.0 - height / 2.0;
    let to_screen = |along: f64, across: f64| -> (f64, f64) {
        match config.orientation {
            Orientation::Horizontal => (offset + along, across),
            Orientation::Vertical => (width / 2.0 + across, along),
        }
    };
    let axis = match config.orientation {
        Orientation::Horizontal => height / 2.0,
        Orientation::Vertical => 0.0,
    };

    let nodes: Vec<NodeLayout> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let (x, y) = to_screen(positions[idx], axis);
            layout_node(NodeId(idx), node, (x, y), radius, scales, theme, config)
        })
        .collect();

    let edges: Vec<EdgeLayout> = graph
        .edges
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            let endpoints = ArcEndpoints {
                source: positions[edge.source.0],
                target: positions[edge.target.0],
                axis,
            };
            let towards_action = graph.target(edge).is_action();
            let count = edge.count.unwrap_or(0) as f64;
            let polygon = arc_polygon(
                endpoints,
                count,
                towards_action,
                |value| scales.link_stroke.apply(value),
                &config.arc,
            );
            let (center_along, center_across) = endpoints.center();
            let center = to_screen(center_along, center_across);
            let points: Vec<(f64, f64)> = polygon
                .iter()
                .map(|ArcPoint { along, across }| {
                    to_screen(center_along + along, center_across + across)
                })
                .collect();
            EdgeLayout {
                index,
                source: edge.source,
                target: edge.target,
                center,
                path: basis_path(&points, true),
                points,
                opacity: scales.link_opacity(edge),
                towards_action,
            }
        })
        .collect();

    let captions = if config.captions {
        caption_layout(config.orientation, width, height, margin, offset)
    } else {
        Vec::new()
    };

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        width,
        height,
        "computed arc layout"
    );

    Layout {
        width,
        height,
        orientation: config.orientation,
        node_radius: radius,
        nodes,
        edges,
        captions,
    }
}

fn layout_node(
    id: NodeId,
    node: &Node,
    (x, y): (f64, f64),
    radius: f64,
    scales: &Scales,
    theme: &Theme,
    config: &LayoutConfig,
) -> NodeLayout {
    let sentinel = node.is_sentinel();
    let (node_radius, fill, outline) = if sentinel {
        (radius / 2.0, theme.sentinel_fill.clone(), None)
    } else {
        let fill = scales
            .node_color(node)
            .unwrap_or(theme.sentinel_fill.as_str())
            .to_string();
        let outline = Outline {
            radius: radius + config.outline_padding as f64,
            dashed: node.is_attribute(),
        };
        (scales.node_radius(node), fill, Some(outline))
    };
    let (text, category) = tooltip_text(&node.name);
    let count_label = match node.count {
        Some(count) if !sentinel => format_count(count),
        _ => String::new(),
    };
    NodeLayout {
        id,
        name: node.name.clone(),
        x,
        y,
        radius: node_radius,
        fill,
        outline,
        tooltip: Tooltip {
            text,
            category,
            x: x + radius,
            y: y - radius,
            rotation: config.tooltip_rotation as f64,
        },
        count_label,
        sentinel,
    }
}

/// Display text and category for a dotted node name such as `action.hacking`.
pub fn tooltip_text(name: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = name.split('.').collect();
    match parts.as_slice() {
        [single] => (single.to_uppercase(), None),
        [category, text] => (text.to_uppercase(), Some((*category).to_string())),
        [_, text, ..] => (text.to_uppercase(), None),
        [] => (String::new(), None),
    }
}

/// Formats a count with comma thousands separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn caption_layout(
    orientation: Orientation,
    width: f64,
    height: f64,
    margin: f64,
    offset: f64,
) -> Vec<Caption> {
    match orientation {
        Orientation::Horizontal => vec![
            Caption {
                text: "LINKS TO ACTIONS".to_string(),
                x: width / 2.0,
                y: margin,
                anchor: TextAnchor::Middle,
            },
            Caption {
                text: "LINKS TO ATTRIBUTES".to_string(),
                x: width / 2.0,
                y: height - margin,
                anchor: TextAnchor::Middle,
            },
            Caption {
                text: "INCIDENT COUNT".to_string(),
                x: offset,
                y: height / 2.0,
                anchor: TextAnchor::End,
            },
        ],
        Orientation::Vertical => vec![
            Caption {
                text: "LINKS TO ACTIONS".to_string(),
                x: width / 2.0 - height / 2.0,
                y: height / 2.0,
                anchor: TextAnchor::End,
            },
            Caption {
                text: "LINKS TO ATTRIBUTES".to_string(),
                x: width / 2.0 + height / 2.0,
                y: height / 2.0,
                anchor: TextAnchor::Start,
            },
            Caption {
                text: "INCIDENT COUNT".to_string(),
                x: width / 2.0,
                y: margin / 2.0,
                anchor: TextAnchor::Middle,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{NormalizeOptions, normalize};
    use crate::parser::parse_description;

    const SCENARIO: &str = r##"{"graphml": {"graph": {
        "node": [
            {"@id": "start", "data": []},
            {"@id": "attribute.integrity", "data": [{"@key": "d0", "#text": "45"}, {"@key": "d1", "#text": "attribute"}]},
            {"@id": "action.hacking", "data": [{"@key": "d0", "#text": "1200"}, {"@key": "d1", "#text": "action"}]},
            {"@id": "end", "data": []}
        ],
        "edge": [
            {"@source": "start", "@target": "action.hacking", "data": [{"@key": "d5", "#text": "120"}]},
            {"@source": "action.hacking", "@target": "attribute.integrity", "data": [{"@key": "d5", "#text": "80"}]},
            {"@source": "attribute.integrity", "@target": "end", "data": [{"@key": "d5", "#text": "45"}]}
        ]
    }}}"##;

    fn scenario_layout(config: &LayoutConfig) -> (AttackGraph, Layout) {
        let graph =
            normalize(&parse_description(SCENARIO).unwrap(), NormalizeOptions::default()).unwrap();
        let theme = Theme::classic();
        let scales = Scales::from_graph(&graph, &theme, config);
        let layout = compute_layout(&graph, &scales, &theme, config);
        (graph, layout)
    }

    #[test]
    fn horizontal_nodes_share_the_axis() {
        let config = LayoutConfig::default();
        let (graph, layout) = scenario_layout(&config);
        assert_eq!(layout.nodes.len(), graph.nodes.len());
        let offset = 1900.0 / 2.0 - 900.0 / 2.0;
        assert_eq!(layout.nodes[0].x, offset + 40.0);
        assert_eq!(layout.nodes[3].x, offset + 860.0);
        assert!(layout.nodes.iter().all(|node| node.y == 450.0));
        assert!(layout.nodes.windows(2).all(|pair| pair[0].x < pair[1].x));
    }

    #[test]
    fn sentinels_are_small_and_grey() {
        let config = LayoutConfig::default();
        let (_, layout) = scenario_layout(&config);
        let start = &layout.nodes[0];
        assert!(start.sentinel);
        assert_eq!(start.radius, 20.0);
        assert_eq!(start.fill, "#d1d3d4");
        assert!(start.outline.is_none());
        assert!(start.count_label.is_empty());
        assert_eq!(start.tooltip.text, "START");
    }

    #[test]
    fn ordinary_nodes_carry_outline_and_labels() {
        let config = LayoutConfig::default();
        let (_, layout) = scenario_layout(&config);
        let hacking = &layout.nodes[1];
        assert_eq!(hacking.tooltip.text, "HACKING");
        assert_eq!(hacking.tooltip.category.as_deref(), Some("action"));
        assert_eq!(hacking.count_label, "1,200");
        assert_eq!(hacking.radius, 40.0);
        assert_eq!(hacking.fill, "#d60005");
        let outline = hacking.outline.unwrap();
        assert_eq!(outline.radius, 42.0);
        assert!(!outline.dashed);
        assert!(layout.nodes[2].outline.unwrap().dashed);
    }

    #[test]
    fn edges_bow_by_target_kind() {
        let config = LayoutConfig::default();
        let (_, layout) = scenario_layout(&config);
        assert_eq!(layout.edges.len(), 3);
        let to_action = &layout.edges[0];
        assert!(to_action.towards_action);
        assert_eq!(to_action.points.len(), 136);
        assert!(to_action.points.iter().all(|p| p.1 <= 450.0 + 1e-9));
        let to_attribute = &layout.edges[1];
        assert!(!to_attribute.towards_action);
        assert!(to_attribute.points.iter().all(|p| p.1 >= 450.0 - 1e-9));
        assert!(to_action.path.starts_with("M "));
        assert!(to_action.path.ends_with(" Z"));
        assert!((to_action.opacity - 0.8).abs() < 1e-6);
        assert!((layout.edges[2].opacity - 0.2).abs() < 1e-6);
    }

    #[test]
    fn vertical_orientation_swaps_axes() {
        let config = LayoutConfig {
            orientation: Orientation::Vertical,
            ..LayoutConfig::default()
        };
        let (_, layout) = scenario_layout(&config);
        assert!(layout.nodes.iter().all(|node| node.x == 950.0));
        assert!(layout.nodes.windows(2).all(|pair| pair[0].y < pair[1].y));
        assert!(layout.edges[0].points.iter().all(|p| p.0 <= 950.0 + 1e-9));
        assert!(layout.edges[1].points.iter().all(|p| p.0 >= 950.0 - 1e-9));
    }

    #[test]
    fn captions_can_be_disabled() {
        let config = LayoutConfig::default();
        let (_, layout) = scenario_layout(&config);
        assert_eq!(layout.captions.len(), 3);
        let config = LayoutConfig {
            captions: false,
            ..LayoutConfig::default()
        };
        let (_, layout) = scenario_layout(&config);
        assert!(layout.captions.is_empty());
    }

    #[test]
    fn tooltip_text_rules() {
        assert_eq!(tooltip_text("start"), ("START".to_string(), None));
        assert_eq!(
            tooltip_text("attribute.integrity"),
            ("INTEGRITY".to_string(), Some("attribute".to_string()))
        );
        assert_eq!(tooltip_text("action.malware.c2"), ("MALWARE".to_string(), None));
    }

    #[test]
    fn formats_counts_with_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
