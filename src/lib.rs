#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod scale;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use error::{GraphError, LoadError, RenderError};
pub use ir::{AttackGraph, Edge, Node, NodeId, NodeKind, Orientation};
pub use layout::{Layout, compute_layout};
pub use normalize::{NormalizeOptions, normalize};
pub use parser::{GraphDescription, parse_description};
pub use render::render_svg;
pub use scale::Scales;
pub use theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Node names of an incident path to mark, in order.
    pub highlight_path: Vec<String>,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn mono() -> Self {
        let theme = Theme::mono();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..RenderConfig::default()
        };
        Self {
            theme,
            render,
            ..Self::default()
        }
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
            highlight_path: Vec::new(),
        }
    }
}

/// Everything produced for one graph description.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub graph: AttackGraph,
    pub layout: Layout,
    pub svg: String,
}

pub fn render_description(
    description: &GraphDescription,
    options: &RenderOptions,
) -> Result<Rendered, GraphError> {
    let graph = normalize(
        description,
        NormalizeOptions {
            reverse_backward_edges: options.layout.reverse_backward_edges,
        },
    )?;
    let scales = Scales::from_graph(&graph, &options.theme, &options.layout);
    let layout = compute_layout(&graph, &scales, &options.theme, &options.layout);
    let state = if options.highlight_path.is_empty() {
        highlight::rest_state(&layout)
    } else {
        highlight::path_highlight(
            &graph,
            &layout,
            &options.theme,
            &options.layout,
            options.highlight_path.as_slice(),
        )?
    };
    let svg = render_svg(
        &graph,
        &layout,
        &state,
        &options.theme,
        &options.layout,
        &options.render,
    );
    Ok(Rendered { graph, layout, svg })
}

/// Parses a GraphML JSON export and renders it to SVG.
pub fn render_with_options(input: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let description = parse_description(input)?;
    Ok(render_description(&description, options)?.svg)
}
