//! Strongly typed node identifier and the string names derived from it.
//!
//! The simulator addresses everything by string id.  None of those strings
//! are stored: they are recomputed from `NodeId`s whenever needed, so two
//! renderings of the same topology always agree.
//!
//! | Object            | Format                         |
//! |-------------------|--------------------------------|
//! | junction          | `N_{node}`                     |
//! | internal edge     | `N_{node}_{slot}`              |
//! | internal lane     | `N_{node}_{slot}_{lane}`       |
//! | road edge         | `E_{from}_{to}` (`-` prefix when `from < to`) |
//! | road lane         | `{edge}_{lane}`                |

use std::fmt;

/// Index of a topology node.  Assigned at creation and never reused.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Junction id of this node, e.g. `N_4`.
    pub fn junction_id(self) -> String {
        format!("N_{}", self.0)
    }

    /// Id of the internal (junction-body) edge in out-slot `slot`.
    pub fn internal_edge_id(self, slot: usize) -> String {
        format!("N_{}_{}", self.0, slot)
    }

    /// Id of internal lane `lane` of the internal edge in out-slot `slot`.
    pub fn internal_lane_id(self, slot: usize, lane: usize) -> String {
        format!("N_{}_{}_{}", self.0, slot, lane)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeId, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}

/// Id of the directed road edge `source → target`.
///
/// The edge pointing from the lower to the higher node id carries a `-`
/// prefix, so the two directions of one road read as `E_3_1` / `-E_1_3`.
pub fn edge_id(source: NodeId, target: NodeId) -> String {
    if source < target {
        format!("-E_{}_{}", source.0, target.0)
    } else {
        format!("E_{}_{}", source.0, target.0)
    }
}

/// Id of lane `lane` of the road edge `source → target`.
pub fn lane_id(source: NodeId, target: NodeId, lane: u32) -> String {
    format!("{}_{}", edge_id(source, target), lane)
}
