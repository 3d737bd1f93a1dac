//! Dead-end layouts: which boundary pairs form the network's through routes.
//!
//! # `config.yml` format
//!
//! ```yaml
//! layout:
//!   main:
//!     - {A: N_1, B: N_3}
//!   side:
//!     - {A: N_2, B: N_4}
//! ```
//!
//! Other top-level keys (e.g. `realization`) are ignored here.
//!
//! A layout is only valid against a concrete set of dead ends: every axis
//! endpoint must be one of them, no pair may be declared twice (in either
//! orientation, across both lists), and every dead end must appear in at
//! least one axis.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{TopologyError, TopologyResult};

// ── Model ─────────────────────────────────────────────────────────────────────

/// Junction id of a boundary node, e.g. `N_3`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeadEnd(pub String);

impl DeadEnd {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeadEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// One designated through route between two dead ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Axis {
    pub a: DeadEnd,
    pub b: DeadEnd,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} - {}>", self.a.0, self.b.0)
    }
}

/// Main and side axes of a network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub main: Vec<Axis>,
    pub side: Vec<Axis>,
}

impl Layout {
    /// A layout with no axes.  Only valid for networks without dead ends.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn main_dead_ends(&self) -> BTreeSet<&DeadEnd> {
        endpoints(&self.main)
    }

    pub fn side_dead_ends(&self) -> BTreeSet<&DeadEnd> {
        endpoints(&self.side)
    }
}

fn endpoints(axes: &[Axis]) -> BTreeSet<&DeadEnd> {
    axes.iter().flat_map(|axis| [&axis.a, &axis.b]).collect()
}

// ── Config records ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRecord {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}

/// The `layout` section of `config.yml`, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub main: Vec<AxisRecord>,
    pub side: Vec<AxisRecord>,
}

#[derive(Deserialize)]
struct ConfigFile {
    layout: LayoutConfig,
}

#[derive(Serialize)]
struct ConfigFileRef<'a> {
    layout: &'a LayoutConfig,
}

impl LayoutConfig {
    /// Records for an already-built layout, e.g. one from a generator.
    pub fn from_layout(layout: &Layout) -> Self {
        let records = |axes: &[Axis]| {
            axes.iter()
                .map(|axis| AxisRecord { a: axis.a.0.clone(), b: axis.b.0.clone() })
                .collect()
        };
        Self { main: records(&layout.main), side: records(&layout.side) }
    }

    /// Validate against `dead_ends` (junction ids) and build a [`Layout`].
    pub fn validate(&self, dead_ends: &[String]) -> TopologyResult<Layout> {
        let mut seen: HashMap<&str, bool> = dead_ends.iter().map(|d| (d.as_str(), false)).collect();
        let mut pairs: HashSet<(String, String)> = HashSet::new();

        let main = extract_axes(&self.main, &mut seen, &mut pairs)?;
        let side = extract_axes(&self.side, &mut seen, &mut pairs)?;

        if let Some(uncovered) = dead_ends.iter().find(|d| !seen[d.as_str()]) {
            return Err(TopologyError::UncoveredDeadEnd(uncovered.clone()));
        }

        tracing::debug!(main = main.len(), side = side.len(), "layout validated");
        Ok(Layout { main, side })
    }
}

fn extract_axes(
    records: &[AxisRecord],
    seen:    &mut HashMap<&str, bool>,
    pairs:   &mut HashSet<(String, String)>,
) -> TopologyResult<Vec<Axis>> {
    let mut axes = Vec::with_capacity(records.len());
    for record in records {
        for end in [&record.a, &record.b] {
            match seen.get_mut(end.as_str()) {
                Some(flag) => *flag = true,
                None => return Err(TopologyError::UnknownDeadEnd(end.clone())),
            }
        }
        let forward = (record.a.clone(), record.b.clone());
        let backward = (record.b.clone(), record.a.clone());
        if pairs.contains(&forward) || pairs.contains(&backward) {
            return Err(TopologyError::DuplicateAxis { a: forward.0, b: forward.1 });
        }
        pairs.insert(forward);
        axes.push(Axis { a: DeadEnd(record.a.clone()), b: DeadEnd(record.b.clone()) });
    }
    Ok(axes)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the `layout` section of a `config.yml` file.
pub fn load_layout_config(path: &Path) -> TopologyResult<LayoutConfig> {
    let file = File::open(path).map_err(TopologyError::Io)?;
    load_layout_config_reader(BufReader::new(file))
}

/// Like [`load_layout_config`] but accepts any `Read` source.
pub fn load_layout_config_reader<R: Read>(reader: R) -> TopologyResult<LayoutConfig> {
    let config: ConfigFile = serde_yaml::from_reader(reader)?;
    Ok(config.layout)
}

/// Write `config` as a `config.yml` document with a single `layout` key.
pub fn write_layout_config<W: Write>(config: &LayoutConfig, writer: W) -> TopologyResult<()> {
    serde_yaml::to_writer(writer, &ConfigFileRef { layout: config })?;
    Ok(())
}

pub fn save_layout_config(config: &LayoutConfig, path: &Path) -> TopologyResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_layout_config(config, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load `config.yml` and validate its layout against `dead_ends`.
pub fn load_layout(path: &Path, dead_ends: &[String]) -> TopologyResult<Layout> {
    load_layout_config(path)?.validate(dead_ends)
}
