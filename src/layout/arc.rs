//! Lens-shaped arc bands between two nodes on the layout axis.
//!
//! An arc is two concentric half circles (inner radius `r - t`, outer radius
//! `r + t`) joined end to end. The displacement `t` starts at the stroke width
//! for the edge count and decays geometrically along the first pass, then
//! grows back on the return pass, so the band is thickest where it leaves
//! the source node.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Upper bound accepted for [`ArcParams::steps`] from configuration.
pub const MAX_ARC_STEPS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcParams {
    /// Angular subdivisions per half circle; each pass emits `steps + 1` points.
    pub steps: u32,
    /// Per-step multiplier applied to the displacement on the first pass.
    pub decay: f64,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            steps: 67,
            decay: 0.96,
        }
    }
}

/// A point in the arc's local frame: `along` runs parallel to the node axis,
/// `across` perpendicular to it. The origin is the midpoint of the endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPoint {
    pub along: f64,
    pub across: f64,
}

impl ArcPoint {
    pub fn radius(&self) -> f64 {
        self.along.hypot(self.across)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEndpoints {
    /// Source position along the axis.
    pub source: f64,
    /// Target position along the axis.
    pub target: f64,
    /// Shared coordinate of both endpoints on the fixed axis.
    pub axis: f64,
}

impl ArcEndpoints {
    /// Local origin of the arc as `(along, across)` in layout space.
    pub fn center(&self) -> (f64, f64) {
        (self.source + (self.target - self.source) / 2.0, self.axis)
    }
}

#[derive(Clone, Copy)]
enum Ring {
    Inner,
    Outer,
}

#[derive(Clone, Copy)]
enum Taper {
    Shrink,
    Grow,
}

/// Polygon outline of the arc band between `source` and `target`.
///
/// `towards_action` picks the side of the axis (actions on the negative
/// `across` side, everything else on the positive side); `stroke` maps the
/// edge count to the initial displacement. Coincident endpoints yield no
/// points.
pub fn arc_polygon<F>(
    endpoints: ArcEndpoints,
    count: f64,
    towards_action: bool,
    stroke: F,
    params: &ArcParams,
) -> Vec<ArcPoint>
where
    F: Fn(f64) -> f64,
{
    let raw = endpoints.source - endpoints.target;
    let separation = raw.abs();
    if separation == 0.0 || !separation.is_finite() || params.steps == 0 {
        return Vec::new();
    }
    let radius = separation / 2.0;
    let mut displacement = stroke(count);
    if !displacement.is_finite() {
        displacement = 0.0;
    }

    let source_first = raw < 0.0;
    // (ring, from, to) for the pass leaving the source, then the return pass
    let passes = match (towards_action, source_first) {
        (true, true) => [(Ring::Inner, PI, 2.0 * PI), (Ring::Outer, 2.0 * PI, PI)],
        (true, false) => [(Ring::Outer, 2.0 * PI, PI), (Ring::Inner, PI, 2.0 * PI)],
        (false, true) => [(Ring::Outer, PI, 0.0), (Ring::Inner, 0.0, PI)],
        (false, false) => [(Ring::Inner, 0.0, PI), (Ring::Outer, PI, 0.0)],
    };

    let per_pass = params.steps as usize + 1;
    let mut points = Vec::with_capacity(per_pass * 2);
    let [(ring, from, to), (back_ring, back_from, back_to)] = passes;
    sweep(
        &mut points,
        radius,
        &mut displacement,
        (ring, from, to),
        Taper::Shrink,
        params,
    );
    sweep(
        &mut points,
        radius,
        &mut displacement,
        (back_ring, back_from, back_to),
        Taper::Grow,
        params,
    );
    points
}

fn sweep(
    points: &mut Vec<ArcPoint>,
    radius: f64,
    displacement: &mut f64,
    (ring, from, to): (Ring, f64, f64),
    taper: Taper,
    params: &ArcParams,
) {
    let steps = params.steps as f64;
    for k in 0..=params.steps {
        let theta = from + (to - from) * (k as f64 / steps);
        let r = match ring {
            Ring::Inner => radius - *displacement,
            Ring::Outer => radius + *displacement,
        };
        points.push(ArcPoint {
            along: r * theta.cos(),
            across: r * theta.sin(),
        });
        *displacement = match taper {
            Taper::Shrink => *displacement * params.decay,
            Taper::Grow => *displacement / params.decay,
        };
    }
}
