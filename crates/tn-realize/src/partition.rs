//! Distributing a junction's outgoing lanes over one in-edge's lanes.
//!
//! # Algorithm
//!
//! For an in-edge `s → j` at junction `j`:
//!
//! 1. Compute the exit bearing `j.direction(t)` of every outgoing edge
//!    `j → t` and sort ascending.  The sort is stable, so equal bearings
//!    keep ascending target order.
//! 2. The pivot is the bearing back toward the in-edge's source,
//!    `j.direction(s)`.  Edges with bearing `≤ pivot` form the left group,
//!    the rest the right group.
//! 3. Balance the groups until their sizes differ by at most one (see
//!    [`balance`]).
//! 4. Flatten: every lane of the left group in edge order, then every lane of
//!    the right group, that second run reversed as a whole.
//! 5. Heads are the in-edge lanes from the highest index down.  With `k =
//!    ceil(total / heads)`, head `i` takes `flat[k·i .. k·(i+1)]`.
//!
//! ```text
//! in-edge from N, outgoing E S W N          flat: E0 E1 N0 N1 | S1 S0 W1 W0
//! sorted by bearing: S E N | W              head 1 ─┘        head 0 ─┘
//! balanced:          E N   | W S
//! ```
//!
//! The edge back to the in-edge's source is an ordinary outgoing edge here,
//! so U-turns are always available.

use std::collections::VecDeque;

use tn_core::{NodeId, edge_id};
use tn_topology::{Edge, Topology};

use crate::{RealizeError, RealizeResult};

// ── Types ─────────────────────────────────────────────────────────────────────

/// One lane of a directed road edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneRef {
    pub source: NodeId,
    pub target: NodeId,
    pub lane:   u32,
}

impl LaneRef {
    pub fn edge_id(&self) -> String {
        edge_id(self.source, self.target)
    }
}

/// Outgoing lanes reachable from one lane of the in-edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Lane index on the in-edge.
    pub head_lane: u32,
    /// May be empty when the junction has few outgoing lanes.
    pub targets:   Vec<LaneRef>,
}

/// Outgoing edges split around the in-edge's pivot bearing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sides<'a> {
    pub left:  VecDeque<&'a Edge>,
    pub right: VecDeque<&'a Edge>,
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Move elements between the two groups until `|left| - |right|` is at
/// most one in absolute value.
///
/// A surplus on the left moves `left[0]` to the tail of `right`; a surplus
/// on the right moves the tail of `right` to the head of `left`.
pub fn balance<T>(left: &mut VecDeque<T>, right: &mut VecDeque<T>) {
    while left.len() > right.len() + 1 {
        if let Some(first) = left.pop_front() {
            right.push_back(first);
        }
    }
    while right.len() > left.len() + 1 {
        if let Some(last) = right.pop_back() {
            left.push_front(last);
        }
    }
}

/// Sort `junction`'s outgoing edges by exit bearing, split them around the
/// bearing of `in_edge` and balance the two groups.
pub fn sides<'a>(topology: &'a Topology, junction: NodeId, in_edge: &Edge) -> RealizeResult<Sides<'a>> {
    let here = topology.point(junction)?;
    let pivot = here.direction(topology.point(in_edge.source)?);

    let mut outgoing = topology
        .outgoing_edges_of(junction)
        .map(|e| Ok((e, here.direction(topology.point(e.target)?))))
        .collect::<RealizeResult<Vec<_>>>()?;
    outgoing.sort_by(|a, b| a.1.total_cmp(&b.1));

    let (mut left, mut right): (VecDeque<_>, VecDeque<_>) = (VecDeque::new(), VecDeque::new());
    for (edge, bearing) in outgoing {
        if bearing <= pivot {
            left.push_back(edge);
        } else {
            right.push_back(edge);
        }
    }
    balance(&mut left, &mut right);
    Ok(Sides { left, right })
}

fn lanes_of(edge: &Edge) -> impl Iterator<Item = LaneRef> + use<> {
    let Edge { source, target, lanes } = *edge;
    (0..lanes).map(move |lane| LaneRef { source, target, lane })
}

/// Every outgoing lane in partition order.
pub fn flatten(sides: &Sides<'_>) -> Vec<LaneRef> {
    let mut flat: Vec<LaneRef> = sides.left.iter().copied().flat_map(lanes_of).collect();
    let mut right: Vec<LaneRef> = sides.right.iter().copied().flat_map(lanes_of).collect();
    right.reverse();
    flat.extend(right);
    flat
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Assign the outgoing lanes of `junction` to the lanes of `in_edge`.
///
/// Returns one [`Partition`] per in-edge lane, highest lane index first.
/// Every outgoing lane appears in exactly one partition.
///
/// # Errors
///
/// [`RealizeError::Infeasible`] unless the junction has strictly more
/// outgoing lanes than `in_edge` has lanes.
pub fn partition_lanes(topology: &Topology, junction: NodeId, in_edge: &Edge) -> RealizeResult<Vec<Partition>> {
    let flat = flatten(&sides(topology, junction, in_edge)?);
    let total = flat.len();
    let heads = in_edge.lanes as usize;

    if total <= heads {
        return Err(RealizeError::Infeasible {
            node:     junction,
            in_edge:  in_edge.id(),
            incoming: in_edge.lanes,
            outgoing: total as u32,
        });
    }

    let k = total.div_ceil(heads);
    let mut partitions: Vec<Partition> = (0..heads)
        .map(|i| {
            let start = (k * i).min(total);
            let end = (k * (i + 1)).min(total);
            Partition {
                head_lane: (heads - 1 - i) as u32,
                targets:   flat[start..end].to_vec(),
            }
        })
        .collect();

    let assigned = (k * heads).min(total);
    if assigned < total {
        if let Some(last) = partitions.last_mut() {
            last.targets.extend_from_slice(&flat[assigned..]);
        }
    }

    for partition in partitions.iter().filter(|p| p.targets.is_empty()) {
        tracing::warn!(
            junction = %junction.junction_id(),
            in_edge  = %in_edge.id(),
            head     = partition.head_lane,
            "head lane receives no outgoing lanes",
        );
    }
    Ok(partitions)
}
