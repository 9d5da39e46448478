use crate::config::LayoutConfig;
use crate::ir::{AttackGraph, Edge, Node};
use crate::theme::Theme;

/// Maps a numeric domain onto a numeric range by linear interpolation.
///
/// Values outside the domain are extrapolated unless `clamp` is set. A
/// degenerate domain (`min == max`) maps every input to the start of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Builds a scale whose domain spans the observed values.
    pub fn from_values<I>(values: I, range: (f64, f64)) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = extent(values)?;
        Some(Self::new((min, max), range))
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        let mut t = (value - d0) / span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }
}

/// Maps a continuous domain onto a discrete range using equal-width buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeScale<T> {
    pub domain: (f64, f64),
    pub range: Vec<T>,
}

impl<T> QuantizeScale<T> {
    pub fn new(domain: (f64, f64), range: Vec<T>) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> Option<&T> {
        if self.range.is_empty() {
            return None;
        }
        let last = self.range.len() - 1;
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        let idx = if span == 0.0 || !span.is_finite() || !value.is_finite() {
            0
        } else {
            let bucket = ((value - d0) * self.range.len() as f64 / span).floor();
            if bucket <= 0.0 {
                0
            } else {
                (bucket as usize).min(last)
            }
        };
        self.range.get(idx)
    }
}

fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Scales derived from one graph, computed once after normalization and
/// passed to layout and highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub node_radius: LinearScale,
    pub node_color: QuantizeScale<String>,
    pub link_opacity: LinearScale,
    pub link_stroke: LinearScale,
}

impl Scales {
    pub fn from_graph(graph: &AttackGraph, theme: &Theme, config: &LayoutConfig) -> Self {
        let radius = config.effective_node_radius() as f64;
        let node_domain = extent(graph.nodes.iter().filter_map(|node| node.count).map(|c| c as f64))
            .unwrap_or((0.0, 0.0));
        let edge_domain = extent(graph.edges.iter().filter_map(|edge| edge.count).map(|c| c as f64))
            .unwrap_or((0.0, 0.0));
        let clamp = config.clamp_scales;

        Self {
            node_radius: LinearScale::new(node_domain, (config.node_min_radius as f64, radius))
                .clamped(clamp),
            node_color: QuantizeScale::new(node_domain, theme.node_colors.clone()),
            link_opacity: LinearScale::new(
                edge_domain,
                (config.link_opacity_min as f64, config.link_opacity_max as f64),
            )
            .clamped(clamp),
            link_stroke: LinearScale::new(edge_domain, (config.stroke_min as f64, radius))
                .clamped(clamp),
        }
    }

    /// Never negative, even when an uncounted node extrapolates below the domain.
    pub fn node_radius(&self, node: &Node) -> f64 {
        self.node_radius.apply(node.count.unwrap_or(0) as f64).max(0.0)
    }

    pub fn node_color(&self, node: &Node) -> Option<&str> {
        self.node_color
            .apply(node.count.unwrap_or(0) as f64)
            .map(String::as_str)
    }

    pub fn link_opacity(&self, edge: &Edge) -> f64 {
        self.link_opacity.apply(edge.count.unwrap_or(0) as f64)
    }

    pub fn link_stroke(&self, count: Option<u64>) -> f64 {
        self.link_stroke.apply(count.unwrap_or(0) as f64)
    }
}
