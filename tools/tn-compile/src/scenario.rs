//! Scenario directories: reading inputs, writing compiled outputs.
//!
//! ```text
//! out/
//! ├── network.net.xml
//! ├── config.yml          (copied from --config)
//! ├── routes.rou.xml      (copied from --routes, after validation)
//! └── simulation.sumocfg
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use tn_realize::{Network, RealizeConfig, compile};
use tn_topology::document::{load_topology_json, save_topology_json};
use tn_topology::generate::Generated;
use tn_topology::layout::{load_layout, save_layout_config};
use tn_topology::LayoutConfig;
use tn_xml::demand::{
    ROUTES_FILE, SIMULATION_FILE, read_routes_file, write_routes_file, write_simulation_config_file,
};
use tn_xml::summary::{CONFIG_FILE, NETWORK_FILE};
use tn_xml::{validate_flows, write_network_file};

use crate::cli::RealizeOverrides;

pub const TOPOLOGY_FILE: &str = "topology.json";

/// The parts of `config.yml` this tool reads besides the layout.
#[derive(Debug, Default, Deserialize)]
struct ScenarioConfig {
    #[serde(default)]
    realization: RealizeConfig,
}

impl RealizeOverrides {
    pub fn apply(&self, config: &mut RealizeConfig) {
        if let Some(v) = self.phase_duration {
            config.phase_duration = v;
        }
        if let Some(v) = self.lane_speed {
            config.lane_speed = v;
        }
        if let Some(v) = self.internal_lane_speed {
            config.internal_lane_speed = v;
        }
        if let Some(v) = self.internal_lane_length {
            config.internal_lane_length = v;
        }
    }
}

/// `realization` section of `path`, defaults when absent.
pub fn load_realize_config(path: Option<&Path>) -> Result<RealizeConfig> {
    let Some(path) = path else {
        return Ok(RealizeConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: ScenarioConfig =
        serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config.realization)
}

/// Inputs of [`compile_scenario`].
pub struct CompileInputs<'a> {
    pub topology:  &'a Path,
    pub config:    Option<&'a Path>,
    pub routes:    Option<&'a Path>,
    pub overrides: RealizeOverrides,
}

/// Compile a topology into the scenario directory `out`.
pub fn compile_scenario(inputs: &CompileInputs<'_>, out: &Path) -> Result<Network> {
    let topology = load_topology_json(inputs.topology)
        .with_context(|| format!("loading topology {}", inputs.topology.display()))?;

    let mut realize = load_realize_config(inputs.config)?;
    inputs.overrides.apply(&mut realize);

    if let Some(config) = inputs.config {
        let layout = load_layout(config, &topology.dead_end_ids())
            .with_context(|| format!("validating layout in {}", config.display()))?;
        tracing::info!(main = layout.main.len(), side = layout.side.len(), "layout accepted");
    }

    let network = compile(&topology, &realize).context("compiling topology")?;

    let flows = match inputs.routes {
        Some(routes) => {
            let flows = read_routes_file(routes).with_context(|| format!("reading {}", routes.display()))?;
            validate_flows(&network, &flows).with_context(|| format!("validating {}", routes.display()))?;
            tracing::info!(flows = flows.len(), "routes accepted");
            Some(flows)
        }
        None => None,
    };

    // Nothing is written until every input has been accepted.
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    write_network_file(&network, &out.join(NETWORK_FILE))?;
    write_simulation_config_file(&out.join(SIMULATION_FILE))?;

    if let Some(config) = inputs.config {
        copy_into(config, &out.join(CONFIG_FILE))?;
    }
    if let Some(flows) = &flows {
        write_routes_file(flows, &out.join(ROUTES_FILE))?;
    }
    Ok(network)
}

fn copy_into(from: &Path, to: &Path) -> Result<()> {
    let same = matches!((fs::canonicalize(from), fs::canonicalize(to)), (Ok(a), Ok(b)) if a == b);
    if !same {
        fs::copy(from, to).with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
    }
    Ok(())
}

/// Write `topology.json` and `config.yml` for a generated topology.
pub fn save_generated(generated: &Generated, out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    save_topology_json(&generated.topology, &out.join(TOPOLOGY_FILE))?;
    save_layout_config(&LayoutConfig::from_layout(&generated.layout), &out.join(CONFIG_FILE))?;
    tracing::info!(
        dir   = %out.display(),
        nodes = generated.topology.node_count(),
        edges = generated.topology.edge_count(),
        "scenario generated",
    );
    Ok(())
}
