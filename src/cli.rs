use crate::config::{Config, load_config};
use crate::error::LoadError;
use crate::ir::Orientation;
use crate::layout_dump::write_layout_dump;
use crate::parser::{GraphDescription, load_description, parse_description};
use crate::render::{write_output_png, write_output_svg};
use crate::theme::Theme;
use crate::{RenderOptions, render_description};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arcd", version, about = "Arc diagram renderer for incident attack graphs")]
pub struct Args {
    /// Input graph description (GraphML JSON export) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Theme name (classic, mono); overrides the config file
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Axis the nodes are laid out on
    #[arg(long = "orientation", value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Comma separated node names of an incident path to highlight
    #[arg(long = "highlight-path", value_delimiter = ',')]
    pub highlight_path: Vec<String>,

    /// Swap source and target of edges whose direction is not "forward"
    #[arg(long = "reverse-backward-edges")]
    pub reverse_backward_edges: bool,

    /// Leave out the hover script
    #[arg(long = "static")]
    pub static_svg: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OrientationArg {
    Horizontal,
    Vertical,
}

impl From<OrientationArg> for Orientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::Horizontal => Orientation::Horizontal,
            OrientationArg::Vertical => Orientation::Vertical,
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = apply_args(load_config(args.config.as_deref())?, &args)?;

    let description = match read_description(args.input.as_deref()) {
        Ok(description) => description,
        Err(err) => {
            tracing::warn!(error = %err, "could not load graph description");
            return Err(err.into());
        }
    };

    let mut options = RenderOptions::from(config);
    options.highlight_path = args.highlight_path.clone();
    let rendered = render_description(&description, &options)?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &rendered.layout, &rendered.graph)?;
    }

    match args.output_format {
        OutputFormat::Svg => write_output_svg(&rendered.svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&rendered.svg, &output, &options.render)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // SVG may be written to stdout, so diagnostics go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_args(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(name) = args.theme.as_deref() {
        config.theme =
            Theme::from_name(name).ok_or_else(|| anyhow::anyhow!("unknown theme `{name}`"))?;
        config.render.background = config.theme.background.clone();
    }
    if let Some(width) = args.width {
        config.layout.width = width;
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
        config.render.height = height;
    }
    if let Some(orientation) = args.orientation {
        config.layout.orientation = orientation.into();
    }
    if args.reverse_backward_edges {
        config.layout.reverse_backward_edges = true;
    }
    if args.static_svg {
        config.render.interactive = false;
    }
    Ok(config)
}

fn read_description(path: Option<&Path>) -> Result<GraphDescription, LoadError> {
    match path {
        Some(path) if path != Path::new("-") => load_description(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            parse_description(&buf)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}
