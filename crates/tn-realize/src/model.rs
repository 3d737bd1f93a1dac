//! Realized network values.
//!
//! Everything here is plain data with simulator string ids already resolved.
//! Values are created once by the realization passes and never mutated, so
//! the XML writer and reader can treat a [`Network`] as a closed document.
//!
//! # Element order
//!
//! Each `Vec` in [`Network`] keeps the order the compiler produced:
//!
//! | Field                  | Order                                        |
//! |------------------------|----------------------------------------------|
//! | `road_edges`           | ascending `(source, target)` node id         |
//! | `junctions`            | ascending node id                            |
//! | `via_connections`      | per junction, per in-edge, per head lane     |
//! | `internal_connections` | same as `via_connections`                    |
//! | `internal_edges`       | ascending junction node id                   |
//! | `tl_logics`            | ascending junction node id                   |

use std::fmt;

use tn_core::Point;

/// Connection direction emitted for every movement.  The simulator
/// recomputes turn geometry itself.
pub const STRAIGHT: &str = "s";

// ── Lanes and edges ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    pub id:     String,
    pub index:  u32,
    /// Speed limit in m/s.
    pub speed:  f64,
    /// Length in metres.
    pub length: f64,
    /// Empty for internal lanes.
    pub shape:  Vec<Point>,
}

/// A directed road between two junctions.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadEdge {
    pub id:    String,
    /// Junction id of the source node.
    pub from:  String,
    /// Junction id of the target node.
    pub to:    String,
    pub shape: Vec<Point>,
    pub lanes: Vec<Lane>,
}

/// The body of a junction, holding one internal lane per partition.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalEdge {
    pub id:    String,
    pub lanes: Vec<Lane>,
}

// ── Junctions ─────────────────────────────────────────────────────────────────

/// Realization stage of a junction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JunctionKind {
    DeadEnd,
    Priority,
    TrafficLight,
}

impl JunctionKind {
    /// Simulator `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            JunctionKind::DeadEnd      => "dead_end",
            JunctionKind::Priority     => "priority",
            JunctionKind::TrafficLight => "traffic_light",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dead_end"      => Some(JunctionKind::DeadEnd),
            "priority"      => Some(JunctionKind::Priority),
            "traffic_light" => Some(JunctionKind::TrafficLight),
            _ => None,
        }
    }
}

impl fmt::Display for JunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-of-way row of a junction.  Part of the file format; the compiler
/// never emits any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub index:    u32,
    pub response: String,
    pub foes:     String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Junction {
    pub id:        String,
    pub kind:      JunctionKind,
    pub point:     Point,
    /// Lane ids of every ingoing road edge.
    pub inc_lanes: Vec<String>,
    /// Lane ids of every outgoing road edge (written as `intLanes`).
    pub int_lanes: Vec<String>,
    pub requests:  Vec<Request>,
}

// ── Connections ───────────────────────────────────────────────────────────────

/// Road lane → road lane movement routed through an internal lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViaConnection {
    pub from_edge:  String,
    pub to_edge:    String,
    pub from_lane:  u32,
    pub to_lane:    u32,
    pub dir:        String,
    /// Index into the junction's phase state strings.
    pub link_index: u32,
    /// Internal lane id.
    pub via:        String,
    /// Controlling traffic light, set only at signalized junctions.
    pub tl:         Option<String>,
}

/// Internal lane → road lane continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalConnection {
    pub from_edge: String,
    pub to_edge:   String,
    pub from_lane: u32,
    pub to_lane:   u32,
    pub dir:       String,
}

// ── Traffic lights ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    /// Seconds.
    pub duration: f64,
    /// One of `g`, `y`, `r` per link index.
    pub state:    String,
}

/// Static signal program of one junction.
#[derive(Clone, Debug, PartialEq)]
pub struct TlLogic {
    pub id:     String,
    pub phases: Vec<Phase>,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// A complete compiled road network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    pub road_edges:           Vec<RoadEdge>,
    pub junctions:            Vec<Junction>,
    pub via_connections:      Vec<ViaConnection>,
    pub internal_connections: Vec<InternalConnection>,
    pub internal_edges:       Vec<InternalEdge>,
    pub tl_logics:            Vec<TlLogic>,
}

impl Network {
    pub fn junction(&self, id: &str) -> Option<&Junction> {
        self.junctions.iter().find(|j| j.id == id)
    }

    pub fn road_edge(&self, id: &str) -> Option<&RoadEdge> {
        self.road_edges.iter().find(|e| e.id == id)
    }

    /// Junctions realized as dead ends, in network order.
    pub fn dead_ends(&self) -> impl Iterator<Item = &Junction> + '_ {
        self.junctions.iter().filter(|j| j.kind == JunctionKind::DeadEnd)
    }

    /// Total number of lanes on internal edges.
    pub fn internal_lane_count(&self) -> usize {
        self.internal_edges.iter().map(|e| e.lanes.len()).sum()
    }
}
