//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tn-compile")]
#[command(about = "Compile road topologies into SUMO networks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a topology JSON document into a scenario directory.
    Compile(CompileArgs),

    /// Generate a synthetic topology and its layout.
    #[command(subcommand)]
    Generate(GenerateCommand),

    /// Print dead ends and capacities of a compiled scenario directory.
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Topology JSON document
    #[arg(short, long, value_name = "FILE")]
    pub topology: PathBuf,

    /// config.yml with `layout` and optional `realization` sections
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Routes document to validate against the compiled network and copy
    #[arg(short, long, value_name = "FILE")]
    pub routes: Option<PathBuf>,

    /// Output scenario directory
    #[arg(short, long, value_name = "DIR")]
    pub out: PathBuf,

    #[command(flatten)]
    pub overrides: RealizeOverrides,
}

/// Per-field overrides of the `realization` section.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct RealizeOverrides {
    /// Seconds per go / yield phase
    #[arg(long)]
    pub phase_duration: Option<f64>,

    /// Road lane speed (m/s)
    #[arg(long)]
    pub lane_speed: Option<f64>,

    /// Internal lane speed (m/s)
    #[arg(long)]
    pub internal_lane_speed: Option<f64>,

    /// Internal lane length (m)
    #[arg(long)]
    pub internal_lane_length: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// One centre junction with evenly spaced arms.
    Star {
        #[arg(long, default_value_t = 4)]
        arms: usize,

        #[arg(long, default_value_t = 100.0)]
        radius: f64,

        #[arg(long, default_value_t = 2)]
        lanes: u32,

        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,
    },

    /// Random main line with a north and a south branch per junction.
    Corridor {
        /// Nominal number of main-line junctions
        #[arg(long, default_value_t = 3)]
        junctions: usize,

        /// Nominal edge length (m)
        #[arg(long, default_value_t = 100.0)]
        edge_length: f64,

        /// Main-line lanes and upper bound for branch lanes
        #[arg(long, default_value_t = 2)]
        max_lanes: u32,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Scenario directory holding network.net.xml and config.yml
    pub dir: PathBuf,

    /// Also write per-dead-end capacities as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}
