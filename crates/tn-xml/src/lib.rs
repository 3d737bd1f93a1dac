//! `tn-xml` — the compiler's file formats.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`writer`]  | `Network` → `.net.xml`                                     |
//! | [`reader`]  | `.net.xml` → `Network`                                     |
//! | [`summary`] | dead ends, layout and lane capacities of a scenario        |
//! | [`demand`]  | junction flows, routes documents, `.sumocfg`               |
//! | [`error`]   | `XmlError`, `XmlResult<T>`, `DemandError`                  |
//!
//! Writing and reading are exact inverses for every network the compiler
//! produces: `read_network_str(&network_to_string(&n)?)? == n`.

mod attrs;
pub mod demand;
pub mod error;
pub mod reader;
pub mod summary;
pub mod writer;


pub use demand::{JunctionFlow, validate_flows, write_routes};
pub use error::{DemandError, XmlError, XmlResult};
pub use reader::{read_network, read_network_file, read_network_str};
pub use summary::{EdgeSummary, NetworkSummary};
pub use writer::{network_to_string, write_network, write_network_file};
