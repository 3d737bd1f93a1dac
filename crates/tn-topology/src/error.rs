//! Topology and layout error type.
//!
//! Every variant is a defect in caller-supplied input and is reported before
//! any realization work starts.

use thiserror::Error;

use tn_core::NodeId;

/// Errors produced while building or loading a topology or layout.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("node {0} not found in topology")]
    UnknownNode(NodeId),

    #[error("node {0} already exists in topology")]
    DuplicateNode(NodeId),

    #[error("edge {from} -> {to} must have at least one lane")]
    InvalidLaneCount { from: NodeId, to: NodeId },

    #[error("node {0} cannot be linked to itself")]
    SelfLoop(NodeId),

    #[error("edge {from} <-> {to} listed with conflicting lane counts {a} and {b}")]
    ConflictingLanes { from: NodeId, to: NodeId, a: u32, b: u32 },

    #[error("axis references unknown dead end {0:?}")]
    UnknownDeadEnd(String),

    #[error("dead end {0:?} is not covered by any axis")]
    UncoveredDeadEnd(String),

    #[error("axis {a:?} - {b:?} is declared more than once")]
    DuplicateAxis { a: String, b: String },

    #[error("invalid generator parameters: {0}")]
    Generator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
