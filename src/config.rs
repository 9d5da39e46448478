use crate::ir::Orientation;
use crate::layout::arc::{ArcParams, MAX_ARC_STEPS};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Fixed node radius; when unset it depends on the canvas width.
    pub node_radius: Option<f32>,
    pub narrow_node_radius: f32,
    pub wide_node_radius: f32,
    pub wide_canvas_width: f32,
    pub node_min_radius: f32,
    pub outline_padding: f32,
    pub stroke_min: f32,
    pub link_opacity_min: f32,
    pub link_opacity_max: f32,
    pub hover_opacity_boost: f32,
    pub hover_dim_opacity: f32,
    pub path_dim_factor: f32,
    pub tooltip_rotation: f32,
    pub arc: ArcParams,
    pub orientation: Orientation,
    pub clamp_scales: bool,
    pub reverse_backward_edges: bool,
    pub captions: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1900.0,
            height: 900.0,
            margin: 40.0,
            node_radius: None,
            narrow_node_radius: 20.0,
            wide_node_radius: 40.0,
            wide_canvas_width: 1600.0,
            node_min_radius: 6.0,
            outline_padding: 2.0,
            stroke_min: 4.0,
            link_opacity_min: 0.2,
            link_opacity_max: 0.8,
            hover_opacity_boost: 0.2,
            hover_dim_opacity: 0.04,
            path_dim_factor: 0.05,
            tooltip_rotation: -45.0,
            arc: ArcParams::default(),
            orientation: Orientation::Horizontal,
            clamp_scales: false,
            reverse_backward_edges: false,
            captions: true,
        }
    }
}

impl LayoutConfig {
    pub fn effective_node_radius(&self) -> f32 {
        if let Some(radius) = self.node_radius {
            return radius;
        }
        if self.width < self.wide_canvas_width {
            self.narrow_node_radius
        } else {
            self.wide_node_radius
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
    /// Embed the hover script and per-node highlight data.
    pub interactive: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1900.0,
            height: 900.0,
            background: "#FFFFFF".to_string(),
            interactive: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutOverrides>,
    interactive: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    caption_font_size: Option<f32>,
    text_color: Option<String>,
    action_text_color: Option<String>,
    attribute_text_color: Option<String>,
    background: Option<String>,
    node_colors: Option<Vec<String>>,
    sentinel_fill: Option<String>,
    outline_fill: Option<String>,
    outline_stroke: Option<String>,
    outline_opacity: Option<f32>,
    arc_fill: Option<String>,
    highlight_fill: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    margin: Option<f32>,
    node_radius: Option<f32>,
    node_min_radius: Option<f32>,
    stroke_min: Option<f32>,
    decay_factor: Option<f64>,
    arc_steps: Option<u32>,
    link_opacity_min: Option<f32>,
    link_opacity_max: Option<f32>,
    orientation: Option<String>,
    clamp_scales: Option<bool>,
    reverse_backward_edges: Option<bool>,
    captions: Option<bool>,
}

/// Loads a JSON (or JSON5) config file over the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::from_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.caption_font_size {
            config.theme.caption_font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.action_text_color {
            config.theme.action_text_color = v;
        }
        if let Some(v) = vars.attribute_text_color {
            config.theme.attribute_text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.node_colors.filter(|colors| !colors.is_empty()) {
            config.theme.node_colors = v;
        }
        if let Some(v) = vars.sentinel_fill {
            config.theme.sentinel_fill = v;
        }
        if let Some(v) = vars.outline_fill {
            config.theme.outline_fill = v;
        }
        if let Some(v) = vars.outline_stroke {
            config.theme.outline_stroke = v;
        }
        if let Some(v) = vars.outline_opacity {
            config.theme.outline_opacity = v;
        }
        if let Some(v) = vars.arc_fill {
            config.theme.arc_fill = v;
        }
        if let Some(v) = vars.highlight_fill {
            config.theme.highlight_fill = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.margin {
            config.layout.margin = v;
        }
        if layout.node_radius.is_some() {
            config.layout.node_radius = layout.node_radius;
        }
        if let Some(v) = layout.node_min_radius {
            config.layout.node_min_radius = v;
        }
        if let Some(v) = layout.stroke_min {
            config.layout.stroke_min = v;
        }
        if let Some(v) = layout.decay_factor {
            if v > 0.0 && v.is_finite() {
                config.layout.arc.decay = v;
            } else {
                anyhow::bail!("decayFactor must be a positive number, got {v}");
            }
        }
        if let Some(v) = layout.arc_steps {
            if v == 0 || v > MAX_ARC_STEPS {
                anyhow::bail!("arcSteps must be between 1 and {MAX_ARC_STEPS}, got {v}");
            }
            config.layout.arc.steps = v;
        }
        if let Some(v) = layout.link_opacity_min {
            config.layout.link_opacity_min = v;
        }
        if let Some(v) = layout.link_opacity_max {
            config.layout.link_opacity_max = v;
        }
        if let Some(v) = layout.orientation.as_deref() {
            config.layout.orientation = Orientation::from_token(v)
                .ok_or_else(|| anyhow::anyhow!("unknown orientation `{v}`"))?;
        }
        if let Some(v) = layout.clamp_scales {
            config.layout.clamp_scales = v;
        }
        if let Some(v) = layout.reverse_backward_edges {
            config.layout.reverse_backward_edges = v;
        }
        if let Some(v) = layout.captions {
            config.layout.captions = v;
        }
    }

    if let Some(v) = parsed.interactive {
        config.render.interactive = v;
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}
