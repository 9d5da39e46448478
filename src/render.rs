use crate::config::{LayoutConfig, RenderConfig};
use crate::highlight::{HighlightState, hover_state};
use crate::ir::AttackGraph;
use crate::layout::{Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

const HOVER_SCRIPT: &str = r#"(function () {
  var svg = document.currentScript ? document.currentScript.ownerSVGElement : null;
  if (!svg) { svg = document.querySelector('svg.arc-diagram'); }
  if (!svg) { return; }
  var data = JSON.parse(svg.querySelector('#arc-hover-data').textContent);
  var arcs = svg.querySelectorAll('.arch');
  var nodes = svg.querySelectorAll('.node');
  var tips = svg.querySelectorAll('.tooltip');
  var counts = svg.querySelectorAll('.nodeCount');
  function each(list, fn) { for (var i = 0; i < list.length; i++) { fn(list[i], i); } }
  function enter(idx) {
    var entry = data.nodes[idx];
    each(arcs, function (el) { el.style.opacity = data.dim; });
    entry.arcs.forEach(function (arc) { arcs[arc[0]].style.opacity = arc[1]; });
    each(nodes, function (el) { el.style.fill = data.grey; });
    each(tips, function (el) { el.style.display = 'none'; });
    entry.lit.forEach(function (i) {
      if (!data.sentinels[i]) { nodes[i].style.fill = nodes[i].getAttribute('data-fill'); }
      tips[i].style.display = 'inline';
    });
    counts[idx].style.opacity = 1;
  }
  function leave() {
    each(arcs, function (el) { el.style.opacity = el.getAttribute('data-opacity'); });
    each(nodes, function (el) { el.style.fill = el.getAttribute('data-fill'); });
    each(tips, function (el) {
      el.style.display = el.getAttribute('data-visible') === '1' ? 'inline' : 'none';
    });
    each(counts, function (el) { el.style.opacity = 0; });
  }
  each(nodes, function (el, idx) {
    el.addEventListener('mouseover', function () { enter(idx); });
    el.addEventListener('mouseout', leave);
  });
})();"#;

#[derive(Debug, Serialize)]
struct HoverData {
    dim: f64,
    grey: String,
    sentinels: Vec<bool>,
    nodes: Vec<HoverEntry>,
}

#[derive(Debug, Serialize)]
struct HoverEntry {
    /// `(arc index, opacity)` for arcs that stay visible.
    arcs: Vec<(usize, f64)>,
    /// Nodes that keep their colour and tooltip.
    lit: Vec<usize>,
}

fn hover_data(
    graph: &AttackGraph,
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
) -> HoverData {
    let dim = config.hover_dim_opacity as f64;
    let nodes = layout
        .nodes
        .iter()
        .map(|node| {
            let state = hover_state(graph, layout, theme, config, node.id);
            HoverEntry {
                arcs: state
                    .arcs
                    .iter()
                    .enumerate()
                    .filter(|(_, arc)| arc.lit)
                    .map(|(idx, arc)| (idx, round3(arc.opacity)))
                    .collect(),
                lit: state
                    .nodes
                    .iter()
                    .enumerate()
                    .filter(|(_, style)| style.tooltip_visible)
                    .map(|(idx, _)| idx)
                    .collect(),
            }
        })
        .collect();
    HoverData {
        dim: round3(dim),
        grey: theme.sentinel_fill.clone(),
        sentinels: layout.nodes.iter().map(|node| node.sentinel).collect(),
        nodes,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Renders the layout with `state` applied. When `interactive` is set the
/// hover data for every node and the script that applies it are embedded.
pub fn render_svg(
    graph: &AttackGraph,
    layout: &Layout,
    state: &HighlightState,
    theme: &Theme,
    layout_config: &LayoutConfig,
    config: &RenderConfig,
) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"arc-diagram\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<style>.label{{font-family:{ff};font-size:{cs}px;fill:{tc};letter-spacing:1px}}.tooltip{{font-family:{ff};font-size:{fs}px;fill:{tc}}}.action.tooltip{{fill:{ac}}}.attribute.tooltip{{fill:{atc}}}.nodeCount{{font-family:{ff};font-size:{fs}px;fill:{tc};pointer-events:none}}.arch{{transition:opacity 0.25s}}</style>",
        ff = escape_xml(&theme.font_family),
        cs = theme.caption_font_size,
        fs = theme.font_size,
        tc = theme.text_color,
        ac = theme.action_text_color,
        atc = theme.attribute_text_color,
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    for caption in &layout.captions {
        svg.push_str(&format!(
            "<text class=\"label\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" dy=\".35em\">{}</text>",
            caption.x,
            caption.y,
            caption.anchor.as_str(),
            escape_xml(&caption.text)
        ));
    }

    svg.push_str("<g id=\"plot\">");

    // Degenerate arcs still get an (empty) element so indices line up with the hover data.
    for (edge, style) in layout.edges.iter().zip(&state.arcs) {
        let fill = style.fill.as_deref().unwrap_or(theme.arc_fill.as_str());
        svg.push_str(&format!(
            "<path class=\"arch\" d=\"{}\" fill=\"{}\" opacity=\"{:.3}\" data-opacity=\"{:.3}\" data-source=\"{}\" data-target=\"{}\"/>",
            edge.path,
            fill,
            style.opacity,
            style.opacity,
            escape_xml(&layout.node(edge.source).name),
            escape_xml(&layout.node(edge.target).name),
        ));
    }

    for (node, style) in layout.nodes.iter().zip(&state.nodes) {
        svg.push_str(&node_svg(node, &style.fill, style.count_visible, theme));
    }

    for (node, style) in layout.nodes.iter().zip(&state.nodes) {
        svg.push_str(&tooltip_svg(node, style.tooltip_visible));
    }

    svg.push_str("</g>");

    if config.interactive {
        let data = hover_data(graph, layout, theme, layout_config);
        let json = serde_json::to_string(&data)
            .unwrap_or_else(|_| "{\"nodes\":[]}".to_string())
            .replace("]]>", "]]\\u003e");
        svg.push_str(&format!(
            "<script type=\"application/json\" id=\"arc-hover-data\"><![CDATA[{}]]></script>",
            json
        ));
        svg.push_str("<script><![CDATA[");
        svg.push_str(HOVER_SCRIPT);
        svg.push_str("]]></script>");
    }

    svg.push_str("</svg>");
    svg
}

fn node_svg(node: &NodeLayout, fill: &str, count_visible: bool, theme: &Theme) -> String {
    let mut out = String::from("<g>");
    if let Some(outline) = node.outline {
        let dash = if outline.dashed {
            " stroke-dasharray=\"4, 4\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<circle class=\"nodeOutline\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"{} opacity=\"{}\"/>",
            node.x,
            node.y,
            outline.radius,
            theme.outline_fill,
            theme.outline_stroke,
            dash,
            theme.outline_opacity
        ));
    }
    out.push_str(&format!(
        "<circle class=\"node\" id=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" data-fill=\"{}\"/>",
        escape_xml(&node.name),
        node.x,
        node.y,
        node.radius,
        fill,
        node.fill
    ));
    out.push_str(&format!(
        "<text class=\"nodeCount\" text-anchor=\"middle\" dy=\".35em\" opacity=\"{}\" transform=\"translate({:.2},{:.2})\">{}</text>",
        if count_visible { 1 } else { 0 },
        node.x,
        node.y,
        escape_xml(&node.count_label)
    ));
    out.push_str("</g>");
    out
}

fn tooltip_svg(node: &NodeLayout, visible: bool) -> String {
    let class = match node.tooltip.category.as_deref() {
        Some(category) => format!("{} tooltip", escape_xml(category)),
        None => "tooltip".to_string(),
    };
    let display = if visible {
        " data-visible=\"1\""
    } else {
        " data-visible=\"0\" display=\"none\""
    };
    format!(
        "<text class=\"{}\" transform=\"translate({:.2},{:.2})rotate({})\"{}>{}</text>",
        class,
        node.tooltip.x,
        node.tooltip.y,
        node.tooltip.rotation,
        display,
        escape_xml(&node.tooltip.text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options {
        font_family: "Helvetica".to_string(),
        ..usvg::Options::default()
    };
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{path_highlight, rest_state};
    use crate::layout::compute_layout;
    use crate::normalize::{NormalizeOptions, normalize};
    use crate::parser::parse_description;
    use crate::scale::Scales;

    const GRAPH: &str = r##"{"graphml": {"graph": {
        "node": [
            {"@id": "start"},
            {"@id": "end"},
            {"@id": "action.hacking", "data": [{"@key": "d0", "#text": "1200"}, {"@key": "d1", "#text": "action"}]},
            {"@id": "attribute.integrity", "data": [{"@key": "d0", "#text": "45"}, {"@key": "d1", "#text": "attribute"}]}
        ],
        "edge": [
            {"@source": "start", "@target": "action.hacking", "data": [{"@key": "d5", "#text": "120"}]},
            {"@source": "action.hacking", "@target": "attribute.integrity", "data": [{"@key": "d5", "#text": "80"}]},
            {"@source": "attribute.integrity", "@target": "end", "data": [{"@key": "d5", "#text": "45"}]}
        ]
    }}}"##;

    fn setup() -> (AttackGraph, Layout, Theme, LayoutConfig) {
        let graph =
            normalize(&parse_description(GRAPH).unwrap(), NormalizeOptions::default()).unwrap();
        let theme = Theme::classic();
        let config = LayoutConfig::default();
        let scales = Scales::from_graph(&graph, &theme, &config);
        let layout = compute_layout(&graph, &scales, &theme, &config);
        (graph, layout, theme, config)
    }

    #[test]
    fn render_svg_basic() {
        let (graph, layout, theme, config) = setup();
        let state = rest_state(&layout);
        let svg = render_svg(&graph, &layout, &state, &theme, &config, &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"arch\"").count(), 3);
        assert_eq!(svg.matches("class=\"node\"").count(), 4);
        assert!(svg.contains("HACKING"));
        assert!(svg.contains("class=\"attribute tooltip\""));
        assert!(svg.contains("stroke-dasharray=\"4, 4\""));
        assert!(svg.contains("1,200"));
        assert!(svg.contains("LINKS TO ACTIONS"));
        assert!(svg.contains("arc-hover-data"));
    }

    #[test]
    fn static_render_skips_script() {
        let (graph, layout, theme, config) = setup();
        let state = rest_state(&layout);
        let render = RenderConfig {
            interactive: false,
            ..RenderConfig::default()
        };
        let svg = render_svg(&graph, &layout, &state, &theme, &config, &render);
        assert!(!svg.contains("<script"));
    }

    #[test]
    fn path_state_colours_arcs() {
        let (graph, layout, theme, config) = setup();
        let path = ["start", "action.hacking"];
        let state = path_highlight(&graph, &layout, &theme, &config, &path).unwrap();
        let svg = render_svg(&graph, &layout, &state, &theme, &config, &RenderConfig::default());
        assert_eq!(svg.matches("fill=\"red\"").count(), 1);
        assert!(svg.contains("display=\"none\""));
    }

    #[test]
    fn hover_data_lists_outgoing_arcs() {
        let (graph, layout, theme, config) = setup();
        let data = hover_data(&graph, &layout, &theme, &config);
        assert_eq!(data.nodes.len(), 4);
        let hacking = graph.node_index("action.hacking").unwrap();
        let entry = &data.nodes[hacking.0];
        assert_eq!(entry.arcs.len(), 1);
        assert_eq!(entry.arcs[0].0, 1);
        assert_eq!(entry.lit, vec![1, 2]);
        let end = graph.node_index("end").unwrap();
        assert!(data.nodes[end.0].arcs.is_empty());
        assert_eq!(data.nodes[end.0].lit, vec![end.0]);
    }

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn mouse_out_restores_the_rendered_path_state() {
        let (graph, layout, theme, config) = setup();
        let path = ["start", "action.hacking"];
        let state = path_highlight(&graph, &layout, &theme, &config, &path).unwrap();
        let svg = render_svg(&graph, &layout, &state, &theme, &config, &RenderConfig::default());
        for style in &state.arcs {
            assert!(svg.contains(&format!("data-opacity=\"{:.3}\"", style.opacity)));
        }
        let faded = format!("data-opacity=\"{:.3}\"", layout.edges[1].opacity * 0.05);
        assert!(svg.contains(&faded));
        let rest = format!("data-opacity=\"{:.3}\"", layout.edges[1].opacity);
        assert!(!svg.contains(&rest));
        assert_eq!(svg.matches("data-visible=\"1\"").count(), 2);
        assert_eq!(svg.matches("data-visible=\"0\" display=\"none\"").count(), 2);
    }

    #[test]
    fn hover_data_keeps_lit_arcs_at_dim_opacity() {
        let (graph, mut layout, theme, _) = setup();
        let config = LayoutConfig {
            hover_opacity_boost: 0.0,
            ..LayoutConfig::default()
        };
        // the outgoing arc lands exactly on the dim level
        layout.edges[1].opacity = config.hover_dim_opacity as f64;
        let data = hover_data(&graph, &layout, &theme, &config);
        let hacking = graph.node_index("action.hacking").unwrap();
        assert_eq!(data.nodes[hacking.0].arcs.len(), 1);
        assert_eq!(data.nodes[hacking.0].arcs[0].0, 1);
    }
}
