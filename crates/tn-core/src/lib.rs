//! `tn-core` — foundational types for the `rust_tn` network compiler.
//!
//! This crate is a dependency of every other `tn-*` crate.  It has no `tn-*`
//! dependencies and only `rand` as a required external one (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId` and the derived junction/edge/lane names     |
//! | [`geo`]         | `Point`, Euclidean distance, bearing                  |
//! | [`capacity`]    | `LaneCapacity` flow / queue formulas                  |
//! | [`rng`]         | `GenRng` (seeded RNG for topology generators)         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `NodeId` and `Point`.    |

pub mod capacity;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capacity::LaneCapacity;
pub use geo::Point;
pub use ids::{NodeId, edge_id, lane_id};
pub use rng::GenRng;
