//! JSON topology documents.
//!
//! # Format
//!
//! ```json
//! {
//!   "nodes": [{"id": 0, "point": {"x": 0.0, "y": 0.0}},
//!             {"id": 1, "point": {"x": 100.0, "y": 0.0}}],
//!   "edges": [{"source": 0, "target": 1, "number_of_lanes": 2}]
//! }
//! ```
//!
//! Listing one direction per road is enough: loading rebuilds both through
//! [`Topology::double_link`].  Listing both directions is accepted as long
//! as their lane counts agree.  Saving writes every directed edge, so a
//! saved document always loads back to the same topology.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use tn_core::{NodeId, Point};

use crate::{Topology, TopologyError, TopologyResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id:    NodeId,
    pub point: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source:          NodeId,
    pub target:          NodeId,
    pub number_of_lanes: u32,
}

/// Serialized form of a [`Topology`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

// ── Conversion ────────────────────────────────────────────────────────────────

impl TopologyDocument {
    /// Snapshot `topology`, listing every directed edge.
    pub fn from_topology(topology: &Topology) -> Self {
        Self {
            nodes: topology
                .nodes()
                .map(|n| NodeRecord { id: n.id, point: n.point })
                .collect(),
            edges: topology
                .edges()
                .map(|e| EdgeRecord {
                    source:          e.source,
                    target:          e.target,
                    number_of_lanes: e.lanes,
                })
                .collect(),
        }
    }

    /// Rebuild the topology, validating every record.
    pub fn into_topology(self) -> TopologyResult<Topology> {
        let mut topology = Topology::new();
        for node in self.nodes {
            topology.add_node(node.id, node.point)?;
        }
        for edge in self.edges {
            if let Some(existing) = topology.edge(edge.source, edge.target) {
                if existing.lanes != edge.number_of_lanes {
                    return Err(TopologyError::ConflictingLanes {
                        from: edge.source,
                        to:   edge.target,
                        a:    existing.lanes,
                        b:    edge.number_of_lanes,
                    });
                }
                continue;
            }
            topology.double_link(edge.source, edge.target, edge.number_of_lanes)?;
        }
        Ok(topology)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a topology from a JSON file.
pub fn load_topology_json(path: &Path) -> TopologyResult<Topology> {
    let file = File::open(path).map_err(TopologyError::Io)?;
    load_topology_reader(BufReader::new(file))
}

/// Like [`load_topology_json`] but accepts any `Read` source.
pub fn load_topology_reader<R: Read>(reader: R) -> TopologyResult<Topology> {
    let doc: TopologyDocument = serde_json::from_reader(reader)?;
    doc.into_topology()
}

/// Write `topology` as pretty-printed JSON to `path`.
pub fn save_topology_json(topology: &Topology, path: &Path) -> TopologyResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_topology(topology, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `topology` as pretty-printed JSON to any `Write` sink.
pub fn write_topology<W: Write>(topology: &Topology, writer: W) -> TopologyResult<()> {
    serde_json::to_writer_pretty(writer, &TopologyDocument::from_topology(topology))?;
    Ok(())
}
