use attack_arc::{Orientation, RenderOptions, Theme, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArcRenderOptions {
    theme: Option<String>,
    orientation: Option<Orientation>,
    width: Option<f32>,
    height: Option<f32>,
    highlight_path: Option<Vec<String>>,
    interactive: Option<bool>,
    reverse_backward_edges: Option<bool>,
}

fn build_render_options(options: ArcRenderOptions) -> RenderOptions {
    let mut render_options = match options.theme.as_deref().and_then(Theme::from_name) {
        Some(theme) => {
            let mut render_options = RenderOptions::classic();
            render_options.render.background = theme.background.clone();
            render_options.theme = theme;
            render_options
        }
        None => RenderOptions::classic(),
    };

    if let Some(orientation) = options.orientation {
        render_options.layout.orientation = orientation;
    }
    if let Some(width) = options.width {
        render_options.layout.width = width;
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.layout.height = height;
        render_options.render.height = height;
    }
    if let Some(interactive) = options.interactive {
        render_options.render.interactive = interactive;
    }
    if let Some(reverse) = options.reverse_backward_edges {
        render_options.layout.reverse_backward_edges = reverse;
    }
    render_options.highlight_path = options.highlight_path.unwrap_or_default();

    render_options
}

#[wasm_bindgen]
pub fn render_attack_graph_svg(
    graph_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ArcRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ArcRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(graph_json, &render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use attack_arc::{Orientation, render_with_options};

    use crate::{ArcRenderOptions, build_render_options};

    const GRAPH: &str = r##"{"graphml": {"graph": {
        "node": [
            {"@id": "start"},
            {"@id": "action.hacking", "data": [{"@key": "d1", "#text": "action"}, {"@key": "d0", "#text": "12"}]},
            {"@id": "attribute.integrity", "data": [{"@key": "d1", "#text": "attribute"}, {"@key": "d0", "#text": "7"}]},
            {"@id": "end"}
        ],
        "edge": [
            {"@source": "start", "@target": "action.hacking", "data": {"@key": "d5", "#text": "12"}},
            {"@source": "action.hacking", "@target": "attribute.integrity", "data": {"@key": "d5", "#text": "7"}},
            {"@source": "attribute.integrity", "@target": "end", "data": {"@key": "d5", "#text": "7"}}
        ]
    }}}"##;

    #[test]
    fn renders_attack_graph_with_default_options() {
        let svg = render_with_options(GRAPH, &build_render_options(ArcRenderOptions::default()))
            .expect("attack graph should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("HACKING"));
        assert!(svg.contains("arc-hover-data"));
    }

    #[test]
    fn options_json_is_applied() {
        let options: ArcRenderOptions = serde_json::from_str(
            r#"{"theme": "mono", "orientation": "vertical", "interactive": false,
                "highlightPath": ["start", "action.hacking"]}"#,
        )
        .expect("options should parse");
        let render_options = build_render_options(options);
        assert_eq!(render_options.layout.orientation, Orientation::Vertical);
        assert!(!render_options.render.interactive);
        assert_eq!(render_options.highlight_path.len(), 2);

        let svg = render_with_options(GRAPH, &render_options).expect("attack graph should render");
        assert!(!svg.contains("<script"));
        assert_eq!(svg.matches("class=\"arch\" d=").count(), 3);
        assert_eq!(svg.matches("fill=\"#1C2430\"").count(), 1);
    }
}
