//! Boundary view of a compiled network.
//!
//! A [`NetworkSummary`] keeps what demand generation needs from a compiled
//! scenario directory: the dead ends, the validated layout over them, and
//! the road edges with their lane capacities.
//!
//! ```text
//! scenario/
//! ├── network.net.xml   → dead ends + road edges
//! └── config.yml        → layout (validated against the dead ends)
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use tn_core::{LaneCapacity, Point};
use tn_realize::Network;
use tn_topology::layout::load_layout_config;
use tn_topology::{Layout, LayoutConfig};

use crate::XmlResult;
use crate::reader::read_network_file;

pub const NETWORK_FILE: &str = "network.net.xml";
pub const CONFIG_FILE: &str = "config.yml";

/// A road edge reduced to its endpoints, geometry and lane capacities.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSummary {
    pub id:    String,
    pub from:  String,
    pub to:    String,
    pub shape: Vec<Point>,
    pub lanes: Vec<LaneCapacity>,
}

impl EdgeSummary {
    pub fn flow_capacity(&self) -> u32 {
        self.lanes.iter().map(LaneCapacity::flow_capacity).sum()
    }

    pub fn queue_capacity(&self) -> u32 {
        self.lanes.iter().map(LaneCapacity::queue_capacity).sum()
    }
}

#[derive(Clone, Debug)]
pub struct NetworkSummary {
    /// Junction ids of every dead end, in network order.
    pub dead_ends: Vec<String>,
    pub edges:     Vec<EdgeSummary>,
    pub layout:    Layout,
}

impl NetworkSummary {
    /// Summarize `network`, validating `layout` against its dead ends.
    pub fn from_network(network: &Network, layout: &LayoutConfig) -> XmlResult<Self> {
        let dead_ends: Vec<String> = network.dead_ends().map(|j| j.id.clone()).collect();
        let layout = layout.validate(&dead_ends)?;
        let edges = network
            .road_edges
            .iter()
            .map(|e| EdgeSummary {
                id:    e.id.clone(),
                from:  e.from.clone(),
                to:    e.to.clone(),
                shape: e.shape.clone(),
                lanes: e.lanes.iter().map(|l| LaneCapacity::new(l.length, l.speed)).collect(),
            })
            .collect();
        Ok(Self { dead_ends, edges, layout })
    }

    /// Load `network.net.xml` and `config.yml` from a scenario directory.
    pub fn load(dir: &Path) -> XmlResult<Self> {
        let network = read_network_file(&dir.join(NETWORK_FILE))?;
        let layout = load_layout_config(&dir.join(CONFIG_FILE))?;
        Self::from_network(&network, &layout)
    }

    pub fn is_dead_end(&self, junction: &str) -> bool {
        self.dead_ends.iter().any(|d| d == junction)
    }

    /// Position of every junction that terminates a road edge.
    pub fn positions(&self) -> BTreeMap<String, Point> {
        let mut positions = BTreeMap::new();
        for edge in &self.edges {
            if let (Some(&first), Some(&last)) = (edge.shape.first(), edge.shape.last()) {
                positions.insert(edge.from.clone(), first);
                positions.insert(edge.to.clone(), last);
            }
        }
        positions
    }

    /// Per dead end, the flow capacity (veh/h) of the roads leaving it.
    pub fn flow_capacities(&self) -> BTreeMap<String, u32> {
        self.per_dead_end(EdgeSummary::flow_capacity)
    }

    /// Per dead end, the number of vehicles the roads leaving it can hold.
    pub fn queue_capacities(&self) -> BTreeMap<String, u32> {
        self.per_dead_end(EdgeSummary::queue_capacity)
    }

    fn per_dead_end(&self, capacity: impl Fn(&EdgeSummary) -> u32) -> BTreeMap<String, u32> {
        let mut capacities = BTreeMap::new();
        for edge in self.edges.iter().filter(|e| self.is_dead_end(&e.from)) {
            *capacities.entry(edge.from.clone()).or_insert(0) += capacity(edge);
        }
        capacities
    }

    /// Flow capacity of every lane on a road touching a dead end.
    pub fn flow_capacity(&self) -> u32 {
        self.edges
            .iter()
            .filter(|e| self.is_dead_end(&e.from) || self.is_dead_end(&e.to))
            .map(EdgeSummary::flow_capacity)
            .sum()
    }

    /// Queue capacity of every road lane in the network.
    pub fn queue_capacity(&self) -> u32 {
        self.edges.iter().map(EdgeSummary::queue_capacity).sum()
    }

    /// Write `dead_end,flow_capacity,queue_capacity` rows, one per dead end
    /// with outgoing roads.
    pub fn write_capacities_csv<W: Write>(&self, sink: W) -> XmlResult<()> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(["dead_end", "flow_capacity", "queue_capacity"])?;

        let queues = self.queue_capacities();
        for (dead_end, flow) in self.flow_capacities() {
            let queue = queues.get(&dead_end).copied().unwrap_or(0);
            writer.write_record(&[dead_end, flow.to_string(), queue.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_capacities_csv_file(&self, path: &Path) -> XmlResult<()> {
        self.write_capacities_csv(std::fs::File::create(path)?)
    }
}
