use crate::ir::AttackGraph;
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub orientation: String,
    pub width: f64,
    pub height: f64,
    pub node_radius: f64,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub count: Option<u64>,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: String,
    pub tooltip: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub source: String,
    pub target: String,
    pub count: Option<u64>,
    pub direction: Option<String>,
    pub opacity: f64,
    pub center: [f64; 2],
    pub points: Vec<[f64; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, graph: &AttackGraph) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let source = graph.node(node.id);
                NodeDump {
                    name: node.name.clone(),
                    kind: source.kind.as_ref().map(|kind| kind.as_str().to_string()),
                    count: source.count,
                    x: node.x,
                    y: node.y,
                    radius: node.radius,
                    fill: node.fill.clone(),
                    tooltip: node.tooltip.text.clone(),
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .zip(&graph.edges)
            .map(|(shape, edge)| EdgeDump {
                source: graph.source(edge).name.clone(),
                target: graph.target(edge).name.clone(),
                count: edge.count,
                direction: edge.direction.clone(),
                opacity: shape.opacity,
                center: [shape.center.0, shape.center.1],
                points: shape.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        LayoutDump {
            orientation: format!("{:?}", layout.orientation),
            width: layout.width,
            height: layout.height,
            node_radius: layout.node_radius,
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, graph: &AttackGraph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
