//! Synthetic topology generators.
//!
//! Both generators return the topology together with a [`Layout`] that
//! already covers every dead end, so the result can be compiled and fed to
//! demand generation directly.
//!
//! ## Star
//!
//! ```text
//!          N_1
//!           |
//!   N_4 --- N_0 --- N_2
//!           |
//!          N_3
//! ```
//!
//! One centre junction and `arms` spokes spaced evenly, clockwise from north.
//!
//! ## Corridor ("simple linear")
//!
//! ```text
//!        |   |   |
//!   W ===+===+===+=== E
//!        |   |   |
//! ```
//!
//! | Quantity                 | Draw                                 |
//! |--------------------------|--------------------------------------|
//! | junctions on main line   | uniform in `[X / 2, 2X]` (≥ 1)       |
//! | edge length              | uniform in `[Y / 2, 2Y]`             |
//! | main-line lanes          | `Z`                                  |
//! | branch lanes             | uniform in `[1, Z]`                  |
//!
//! The main axis joins the two corridor ends; each junction's north/south
//! branch pair forms a side axis.

use std::f64::consts::{FRAC_PI_2, TAU};

use tn_core::{GenRng, NodeId, Point};

use crate::layout::{Axis, DeadEnd, Layout};
use crate::{Topology, TopologyError, TopologyResult};

/// A generated topology and a layout covering its dead ends.
#[derive(Clone, Debug)]
pub struct Generated {
    pub topology: Topology,
    pub layout:   Layout,
}

fn dead_end(id: NodeId) -> DeadEnd {
    DeadEnd(id.junction_id())
}

/// Snap to millimetres so cardinal arms land on exact coordinates.
///
/// Negative zero is folded to zero: `atan2(-0.0, x < 0)` is `-π`, which
/// would sort a west arm before every other bearing.
fn snap(v: f64) -> f64 {
    let snapped = (v * 1_000.0).round() / 1_000.0;
    if snapped == 0.0 { 0.0 } else { snapped }
}

// ── Star ──────────────────────────────────────────────────────────────────────

/// One centre node with `arms` spokes of length `radius`, every edge with
/// `lanes` lanes.
///
/// Arm `i` is paired with arm `i + arms / 2` into an axis; the first pair is
/// the main axis.
pub fn star(arms: usize, radius: f64, lanes: u32) -> TopologyResult<Generated> {
    if arms < 2 {
        return Err(TopologyError::Generator(format!("a star needs at least 2 arms, got {arms}")));
    }
    if !(radius > 0.0) {
        return Err(TopologyError::Generator(format!("radius must be positive, got {radius}")));
    }

    let mut topology = Topology::new();
    let centre = topology.push_node(Point::new(0.0, 0.0));

    let mut spokes = Vec::with_capacity(arms);
    for i in 0..arms {
        let angle = FRAC_PI_2 - TAU * i as f64 / arms as f64;
        let tip = topology.push_node(Point::new(
            snap(radius * angle.cos()),
            snap(radius * angle.sin()),
        ));
        topology.double_link(centre, tip, lanes)?;
        spokes.push(tip);
    }

    let half = arms / 2;
    let mut axes: Vec<Axis> = (0..arms.div_ceil(2))
        .map(|i| Axis { a: dead_end(spokes[i]), b: dead_end(spokes[(i + half) % arms]) })
        .collect();
    let side = axes.split_off(1);

    Ok(Generated { topology, layout: Layout { main: axes, side } })
}

// ── Corridor ──────────────────────────────────────────────────────────────────

/// Parameters of [`corridor`].
#[derive(Copy, Clone, Debug)]
pub struct CorridorParams {
    /// Nominal number of main-line junctions (X).
    pub junctions:   usize,
    /// Nominal edge length in metres (Y).
    pub edge_length: f64,
    /// Main-line lane count and branch lane upper bound (Z).
    pub max_lanes:   u32,
}

impl Default for CorridorParams {
    fn default() -> Self {
        Self { junctions: 3, edge_length: 100.0, max_lanes: 2 }
    }
}

/// Random main line with a north and a south branch at every junction.
pub fn corridor(params: CorridorParams, rng: &mut GenRng) -> TopologyResult<Generated> {
    let CorridorParams { junctions, edge_length, max_lanes } = params;
    if junctions == 0 || max_lanes == 0 || !(edge_length > 0.0) {
        return Err(TopologyError::Generator(format!("{params:?}")));
    }

    let count = rng.gen_range((junctions / 2).max(1)..=junctions * 2);
    let mut length = || rng.gen_range(edge_length / 2.0..=edge_length * 2.0);

    let mut topology = Topology::new();
    let west = topology.push_node(Point::new(0.0, 0.0));
    let mut x = 0.0;
    let mut prev = west;
    let mut branches = Vec::with_capacity(count);

    for _ in 0..count {
        x = snap(x + length());
        let junction = topology.push_node(Point::new(x, 0.0));
        topology.double_link(prev, junction, max_lanes)?;

        let north = topology.push_node(Point::new(x, snap(length())));
        let south = topology.push_node(Point::new(x, -snap(length())));
        branches.push((junction, north, south));
        prev = junction;
    }

    x = snap(x + length());
    let east = topology.push_node(Point::new(x, 0.0));
    topology.double_link(prev, east, max_lanes)?;

    // Branch lanes are drawn after geometry so the two streams stay
    // independent of each other.
    let mut lanes_rng = rng.child(1);
    for &(junction, north, south) in &branches {
        topology.double_link(junction, north, lanes_rng.gen_range(1..=max_lanes))?;
        topology.double_link(junction, south, lanes_rng.gen_range(1..=max_lanes))?;
    }

    tracing::debug!(junctions = count, nodes = topology.node_count(), "corridor generated");

    let layout = Layout {
        main: vec![Axis { a: dead_end(west), b: dead_end(east) }],
        side: branches
            .iter()
            .map(|&(_, north, south)| Axis { a: dead_end(north), b: dead_end(south) })
            .collect(),
    };
    Ok(Generated { topology, layout })
}
