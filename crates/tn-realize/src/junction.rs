//! Junction realization stages.
//!
//! A node is lowered through up to three stages, each refining the output of
//! the previous one:
//!
//! ```text
//! DeadEnd ──► Priority ──► TrafficLight
//!  lanes       + internal edge      + tl attribute on connections
//!              + via / internal     + one TlLogic (go / yield per
//!                connections          in-edge)
//! ```
//!
//! [`classify`] picks the final stage: a node with exactly one edge in and
//! one edge out is a dead end, every other node gets a traffic light.
//! [`realize_node_as`] can stop at any stage explicitly.

use indexmap::IndexMap;

use tn_core::NodeId;
use tn_topology::Topology;

use crate::model::{
    InternalConnection, InternalEdge, Junction, JunctionKind, Lane, Phase, STRAIGHT, TlLogic,
    ViaConnection,
};
use crate::partition::partition_lanes;
use crate::{RealizeConfig, RealizeError, RealizeResult};

/// Everything one node contributes to the network.
#[derive(Clone, Debug, PartialEq)]
pub struct RealizedJunction {
    pub junction:             Junction,
    pub internal_edge:        Option<InternalEdge>,
    pub via_connections:      Vec<ViaConnection>,
    pub internal_connections: Vec<InternalConnection>,
    pub tl_logic:             Option<TlLogic>,
}

// ── Classification ────────────────────────────────────────────────────────────

/// Final realization stage of `node`.
///
/// # Errors
///
/// - [`RealizeError::Topology`] if `node` is not in `topology`.
/// - [`RealizeError::Isolated`] if `node` has no edges.
pub fn classify(topology: &Topology, node: NodeId) -> RealizeResult<JunctionKind> {
    topology.point(node)?;
    let outgoing = topology.outgoing_edges_of(node).count();
    let ingoing = topology.ingoing_edges_of(node).count();
    match (outgoing, ingoing) {
        (0, 0) => Err(RealizeError::Isolated(node)),
        (1, 1) => Ok(JunctionKind::DeadEnd),
        _      => Ok(JunctionKind::TrafficLight),
    }
}

/// Realize `node` at the stage chosen by [`classify`].
pub fn realize_node(topology: &Topology, node: NodeId, config: &RealizeConfig) -> RealizeResult<RealizedJunction> {
    let kind = classify(topology, node)?;
    realize_node_as(topology, node, kind, config)
}

/// Realize `node` up to stage `kind`, regardless of its degree.
pub fn realize_node_as(
    topology: &Topology,
    node:     NodeId,
    kind:     JunctionKind,
    config:   &RealizeConfig,
) -> RealizeResult<RealizedJunction> {
    topology.point(node)?;
    if topology.outgoing_edges_of(node).next().is_none() && topology.ingoing_edges_of(node).next().is_none() {
        return Err(RealizeError::Isolated(node));
    }

    let realized = match kind {
        JunctionKind::DeadEnd      => dead_end(topology, node)?,
        JunctionKind::Priority     => priority(topology, node, config)?,
        JunctionKind::TrafficLight => traffic_light(priority(topology, node, config)?, config),
    };

    tracing::debug!(
        junction       = %realized.junction.id,
        kind           = %realized.junction.kind,
        internal_lanes = realized.internal_edge.as_ref().map_or(0, |e| e.lanes.len()),
        "junction realized",
    );
    Ok(realized)
}

// ── Stages ────────────────────────────────────────────────────────────────────

/// Junction record only: incoming and outgoing lane ids.
fn dead_end(topology: &Topology, node: NodeId) -> RealizeResult<RealizedJunction> {
    let inc_lanes = topology
        .ingoing_edges_of(node)
        .flat_map(|e| (0..e.lanes).map(move |l| e.lane_id(l)))
        .collect();
    let int_lanes = topology
        .outgoing_edges_of(node)
        .flat_map(|e| (0..e.lanes).map(move |l| e.lane_id(l)))
        .collect();

    Ok(RealizedJunction {
        junction: Junction {
            id:       node.junction_id(),
            kind:     JunctionKind::DeadEnd,
            point:    topology.point(node)?,
            inc_lanes,
            int_lanes,
            requests: Vec::new(),
        },
        internal_edge:        None,
        via_connections:      Vec::new(),
        internal_connections: Vec::new(),
        tl_logic:             None,
    })
}

/// Dead end plus one internal lane per in-edge head and the connections
/// through it.
///
/// Internal lane indices run across all in-edges of the junction, so each
/// one doubles as the link index of its via connections.
fn priority(topology: &Topology, node: NodeId, config: &RealizeConfig) -> RealizeResult<RealizedJunction> {
    let mut realized = dead_end(topology, node)?;
    realized.junction.kind = JunctionKind::Priority;

    let internal_edge_id = node.internal_edge_id(0);
    let mut lanes = Vec::new();

    for in_edge in topology.ingoing_edges_of(node) {
        let from_edge = in_edge.id();
        for partition in partition_lanes(topology, node, in_edge)? {
            let index = lanes.len();
            let via = node.internal_lane_id(0, index);
            lanes.push(Lane {
                id:     via.clone(),
                index:  index as u32,
                speed:  config.internal_lane_speed,
                length: config.internal_lane_length,
                shape:  Vec::new(),
            });

            for target in &partition.targets {
                let to_edge = target.edge_id();
                realized.via_connections.push(ViaConnection {
                    from_edge:  from_edge.clone(),
                    to_edge:    to_edge.clone(),
                    from_lane:  partition.head_lane,
                    to_lane:    target.lane,
                    dir:        STRAIGHT.to_string(),
                    link_index: index as u32,
                    via:        via.clone(),
                    tl:         None,
                });
                realized.internal_connections.push(InternalConnection {
                    from_edge: internal_edge_id.clone(),
                    to_edge,
                    from_lane: index as u32,
                    to_lane:   target.lane,
                    dir:       STRAIGHT.to_string(),
                });
            }
        }
    }

    realized.internal_edge = Some(InternalEdge { id: internal_edge_id, lanes });
    Ok(realized)
}

/// Priority junction plus a static program giving each in-edge a go phase
/// followed by a yield phase.
fn traffic_light(mut realized: RealizedJunction, config: &RealizeConfig) -> RealizedJunction {
    let tl_id = realized.junction.id.clone();
    realized.junction.kind = JunctionKind::TrafficLight;

    let link_count = realized.internal_edge.as_ref().map_or(0, |e| e.lanes.len());
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for via in &mut realized.via_connections {
        via.tl = Some(tl_id.clone());
    }
    for via in &realized.via_connections {
        groups.entry(via.from_edge.as_str()).or_default().push(via.link_index as usize);
    }

    let mut phases = Vec::with_capacity(groups.len() * 2);
    for links in groups.values() {
        let mut go = vec!['r'; link_count];
        for &link in links {
            go[link] = 'g';
        }
        let go: String = go.into_iter().collect();
        let yield_ = go.replace('g', "y");
        phases.push(Phase { duration: config.phase_duration, state: go });
        phases.push(Phase { duration: config.phase_duration, state: yield_ });
    }

    realized.tl_logic = Some(TlLogic { id: tl_id, phases });
    realized
}
