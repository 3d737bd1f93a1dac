//! `tn-topology` — the compiler's input model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`topology`] | `Topology`, `Node`, `Edge` — symmetric adjacency maps       |
//! | [`document`] | JSON `{nodes, edges}` load / save                           |
//! | [`layout`]   | `DeadEnd`, `Axis`, `Layout`, `config.yml` loading           |
//! | [`generate`] | star and random corridor topologies                         |
//! | [`error`]    | `TopologyError`, `TopologyResult<T>`                        |
//!
//! A `Topology` can only grow through [`Topology::double_link`], so every
//! directed edge has its reverse.  The realization algorithm in `tn-realize`
//! relies on that symmetry.

pub mod document;
pub mod error;
pub mod generate;
pub mod layout;
pub mod topology;

#[cfg(test)]
mod tests;

pub use document::TopologyDocument;
pub use error::{TopologyError, TopologyResult};
pub use layout::{Axis, DeadEnd, Layout, LayoutConfig};
pub use topology::{Edge, Node, Topology};
