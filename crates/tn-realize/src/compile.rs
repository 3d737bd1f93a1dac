//! Whole-topology compilation.

use tn_topology::Topology;

use crate::edge::realize_edge;
use crate::junction::realize_node;
use crate::model::Network;
use crate::{RealizeConfig, RealizeResult};

/// Compile `topology` into a [`Network`].
///
/// Road edges come first in ascending `(source, target)` order, then every
/// node is realized in ascending id order and its parts are appended to the
/// matching network lists.
///
/// # Errors
///
/// The first node that cannot be realized aborts compilation.
pub fn compile(topology: &Topology, config: &RealizeConfig) -> RealizeResult<Network> {
    let mut network = Network::default();

    for edge in topology.edges() {
        network.road_edges.push(realize_edge(topology, edge, config)?);
    }

    for node in topology.nodes() {
        let realized = realize_node(topology, node.id, config)?;
        network.junctions.push(realized.junction);
        network.internal_edges.extend(realized.internal_edge);
        network.via_connections.extend(realized.via_connections);
        network.internal_connections.extend(realized.internal_connections);
        network.tl_logics.extend(realized.tl_logic);
    }

    tracing::info!(
        junctions      = network.junctions.len(),
        dead_ends      = network.dead_ends().count(),
        road_edges     = network.road_edges.len(),
        internal_lanes = network.internal_lane_count(),
        connections    = network.via_connections.len(),
        tl_logics      = network.tl_logics.len(),
        "network compiled",
    );
    Ok(network)
}
