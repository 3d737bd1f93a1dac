//! `tn-realize` — lowers a [`Topology`](tn_topology::Topology) into a
//! simulator-ready [`Network`].
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`model`]     | realized value types: lanes, edges, junctions, phases     |
//! | [`config`]    | `RealizeConfig` (speeds, lengths, phase duration)         |
//! | [`edge`]      | road edge realization                                     |
//! | [`partition`] | distributing outgoing lanes over incoming lanes           |
//! | [`junction`]  | dead end → priority → traffic light realization stages    |
//! | [`compile`]   | whole-topology assembly                                   |
//! | [`error`]     | `RealizeError`, `RealizeResult<T>`                        |
//!
//! # Usage
//!
//! ```rust,ignore
//! let topology = tn_topology::document::load_topology_json(path)?;
//! let network  = tn_realize::compile(&topology, &RealizeConfig::default())?;
//! ```
//!
//! Compilation is a pure function of its inputs: the same topology and
//! config always produce an identical `Network`.

pub mod compile;
pub mod config;
pub mod edge;
pub mod error;
pub mod junction;
pub mod model;
pub mod partition;

#[cfg(test)]
mod tests;

pub use compile::compile;
pub use config::RealizeConfig;
pub use error::{RealizeError, RealizeResult};
pub use junction::{RealizedJunction, classify, realize_node, realize_node_as};
pub use model::{
    InternalConnection, InternalEdge, Junction, JunctionKind, Lane, Network, Phase, Request,
    RoadEdge, TlLogic, ViaConnection,
};
pub use partition::{LaneRef, Partition, partition_lanes};
