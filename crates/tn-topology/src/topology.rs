//! Abstract road topology: nodes plus symmetric directed edges.
//!
//! # Data layout
//!
//! Nodes live in a single arena keyed by [`NodeId`]; edges refer to their
//! endpoints by id and never own them.  Adjacency is kept twice:
//!
//! ```text
//! outgoing[a][b] = Edge a → b
//! ingoing[b][a]  = Edge a → b   (same value)
//! ```
//!
//! Every map is a `BTreeMap`, so iterating a node's edges is ascending by the
//! neighbour's id.  The realization pass inherits that order, which is what
//! makes compiled networks byte-for-byte reproducible.

use std::collections::BTreeMap;

use tn_core::{NodeId, Point, edge_id, lane_id};

use crate::{TopologyError, TopologyResult};

// ── Node / Edge ───────────────────────────────────────────────────────────────

/// A junction-to-be: identity plus position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    pub id:    NodeId,
    pub point: Point,
}

/// A directed road segment between two nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Number of lanes, always ≥ 1.
    pub lanes:  u32,
}

impl Edge {
    /// Simulator id of this edge (see [`tn_core::edge_id`]).
    pub fn id(&self) -> String {
        edge_id(self.source, self.target)
    }

    /// Simulator id of lane `lane`.
    pub fn lane_id(&self, lane: u32) -> String {
        debug_assert!(lane < self.lanes, "lane {lane} out of range for {}", self.id());
        lane_id(self.source, self.target, lane)
    }

    /// The same road segment in the opposite direction.
    pub fn reversed(&self) -> Edge {
        Edge { source: self.target, target: self.source, lanes: self.lanes }
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Append-only symmetric road graph.
///
/// # Example
///
/// ```
/// use tn_core::Point;
/// use tn_topology::Topology;
///
/// let mut t = Topology::new();
/// let a = t.push_node(Point::new(0.0, 0.0));
/// let b = t.push_node(Point::new(100.0, 0.0));
/// t.double_link(a, b, 2).unwrap();
/// assert_eq!(t.edge_count(), 2); // both directions
/// assert_eq!(t.outgoing_edges_of(b).count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Topology {
    nodes:    BTreeMap<NodeId, Node>,
    outgoing: BTreeMap<NodeId, BTreeMap<NodeId, Edge>>,
    ingoing:  BTreeMap<NodeId, BTreeMap<NodeId, Edge>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// An id guaranteed not to be in use: one past the largest id, or the
    /// lowest free id once `u32::MAX` is taken.
    pub fn next_node_id(&self) -> NodeId {
        let Some(last) = self.nodes.keys().next_back() else {
            return NodeId(0);
        };
        if let Some(next) = last.0.checked_add(1) {
            return NodeId(next);
        }
        let mut free = 0u32;
        for id in self.nodes.keys() {
            match (id.0 == free, free.checked_add(1)) {
                (true, Some(next)) => free = next,
                _ => break,
            }
        }
        NodeId(free)
    }

    /// Insert a node under a caller-chosen id.
    pub fn add_node(&mut self, id: NodeId, point: Point) -> TopologyResult<NodeId> {
        if self.nodes.contains_key(&id) {
            return Err(TopologyError::DuplicateNode(id));
        }
        self.nodes.insert(id, Node { id, point });
        Ok(id)
    }

    /// Insert a node under [`next_node_id`](Self::next_node_id) and return it.
    pub fn push_node(&mut self, point: Point) -> NodeId {
        let id = self.next_node_id();
        self.nodes.insert(id, Node { id, point });
        id
    }

    /// Link `a` and `b` with one edge in each direction, both with `lanes`
    /// lanes.  This is the only way edges enter a topology.
    ///
    /// Linking an already-linked pair replaces both directions.
    pub fn double_link(&mut self, a: NodeId, b: NodeId, lanes: u32) -> TopologyResult<()> {
        for id in [a, b] {
            if !self.nodes.contains_key(&id) {
                return Err(TopologyError::UnknownNode(id));
            }
        }
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        if lanes == 0 {
            return Err(TopologyError::InvalidLaneCount { from: a, to: b });
        }

        let atob = Edge { source: a, target: b, lanes };
        let btoa = atob.reversed();
        self.outgoing.entry(a).or_default().insert(b, atob);
        self.ingoing.entry(b).or_default().insert(a, atob);
        self.outgoing.entry(b).or_default().insert(a, btoa);
        self.ingoing.entry(a).or_default().insert(b, btoa);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Position of `id`.
    pub fn point(&self, id: NodeId) -> TopologyResult<Point> {
        self.nodes
            .get(&id)
            .map(|n| n.point)
            .ok_or(TopologyError::UnknownNode(id))
    }

    /// All nodes, ascending by id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Edges leaving `id`, ascending by target id.  Empty for unknown ids.
    pub fn outgoing_edges_of(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing.get(&id).into_iter().flat_map(|m| m.values())
    }

    /// Edges entering `id`, ascending by source id.  Empty for unknown ids.
    pub fn ingoing_edges_of(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.ingoing.get(&id).into_iter().flat_map(|m| m.values())
    }

    /// The edge `a → b`, if linked.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.outgoing.get(&a).and_then(|m| m.get(&b))
    }

    /// Every directed edge, ascending by `(source, target)`.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing.values().flat_map(|m| m.values())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (twice the number of `double_link` pairs).
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A node with exactly one edge in and one edge out: a network boundary.
    pub fn is_dead_end(&self, id: NodeId) -> bool {
        self.outgoing_edges_of(id).count() == 1 && self.ingoing_edges_of(id).count() == 1
    }

    /// Junction ids of every dead end, ascending by node id.
    pub fn dead_end_ids(&self) -> Vec<String> {
        self.nodes
            .keys()
            .filter(|&&id| self.is_dead_end(id))
            .map(|id| id.junction_id())
            .collect()
    }
}
