use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub caption_font_size: f32,
    pub text_color: String,
    pub action_text_color: String,
    pub attribute_text_color: String,
    pub background: String,
    /// Colour stops for node fills, low to high incident count.
    pub node_colors: Vec<String>,
    pub sentinel_fill: String,
    pub outline_fill: String,
    pub outline_stroke: String,
    pub outline_opacity: f32,
    pub arc_fill: String,
    pub highlight_fill: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Helvetica, Arial, sans-serif".to_string(),
            font_size: 12.0,
            caption_font_size: 14.0,
            text_color: "#333333".to_string(),
            action_text_color: "#6D6E71".to_string(),
            attribute_text_color: "#A7A9AC".to_string(),
            background: "#FFFFFF".to_string(),
            node_colors: vec![
                "#f5ee57".to_string(),
                "#f8b74d".to_string(),
                "#fb5152".to_string(),
                "#d60005".to_string(),
            ],
            sentinel_fill: "#d1d3d4".to_string(),
            outline_fill: "white".to_string(),
            outline_stroke: "black".to_string(),
            outline_opacity: 0.4,
            arc_fill: "slategray".to_string(),
            highlight_fill: "red".to_string(),
        }
    }

    pub fn mono() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            caption_font_size: 13.0,
            text_color: "#1C2430".to_string(),
            action_text_color: "#1C2430".to_string(),
            attribute_text_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
            node_colors: vec![
                "#D7E0F0".to_string(),
                "#A9B8D3".to_string(),
                "#7A8AA6".to_string(),
                "#3E4A61".to_string(),
            ],
            sentinel_fill: "#EEF2F8".to_string(),
            outline_fill: "#FFFFFF".to_string(),
            outline_stroke: "#1C2430".to_string(),
            outline_opacity: 0.3,
            arc_fill: "#7A8AA6".to_string(),
            highlight_fill: "#1C2430".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "mono" | "monochrome" => Some(Self::mono()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
