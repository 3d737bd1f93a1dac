//! Realization error type.

use thiserror::Error;

use tn_core::NodeId;
use tn_topology::TopologyError;

/// Errors produced by `tn-realize`.
///
/// Any error aborts the whole compilation; no partial network is returned.
#[derive(Debug, Error)]
pub enum RealizeError {
    /// The junction's outgoing lanes cannot cover the heads of one of its
    /// incoming edges.
    #[error(
        "junction {node}: in-edge {in_edge} has {incoming} lanes but only {outgoing} outgoing lanes are available"
    )]
    Infeasible { node: NodeId, in_edge: String, incoming: u32, outgoing: u32 },

    #[error("node {0} has no edges and cannot be realized as a junction")]
    Isolated(NodeId),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

pub type RealizeResult<T> = Result<T, RealizeError>;
