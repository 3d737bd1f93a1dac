//! Road edge realization.

use tn_topology::{Edge, Topology};

use crate::model::{Lane, RoadEdge};
use crate::{RealizeConfig, RealizeResult};

/// Realize `edge` as a straight road between its endpoints.
///
/// Every lane follows the edge shape, is as long as the distance between the
/// endpoints and has the configured road speed.
pub fn realize_edge(topology: &Topology, edge: &Edge, config: &RealizeConfig) -> RealizeResult<RoadEdge> {
    let from = topology.point(edge.source)?;
    let to = topology.point(edge.target)?;
    let shape = vec![from, to];
    let length = from.distance(to);

    let lanes = (0..edge.lanes)
        .map(|index| Lane {
            id:     edge.lane_id(index),
            index,
            speed:  config.lane_speed,
            length,
            shape:  shape.clone(),
        })
        .collect();

    Ok(RoadEdge {
        id:    edge.id(),
        from:  edge.source.junction_id(),
        to:    edge.target.junction_id(),
        shape,
        lanes,
    })
}
