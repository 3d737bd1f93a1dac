//! tn-compile — command-line front end of the rust_tn network compiler.
//!
//! ```text
//! tn-compile generate star --arms 4 --out scenarios/plus
//! tn-compile compile --topology scenarios/plus/topology.json \
//!                    --config scenarios/plus/config.yml --out scenarios/plus
//! tn-compile summary scenarios/plus --csv capacities.csv
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` (default `info`) to adjust.

mod cli;
mod scenario;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tn_core::GenRng;
use tn_topology::generate::{CorridorParams, corridor, star};
use tn_xml::NetworkSummary;

use cli::{Cli, Command, CompileArgs, GenerateCommand, SummaryArgs};
use scenario::{CompileInputs, compile_scenario, save_generated};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Compile(args)     => run_compile(&args),
        Command::Generate(command) => run_generate(command),
        Command::Summary(args)     => run_summary(&args),
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_compile(args: &CompileArgs) -> Result<()> {
    let t0 = Instant::now();
    let inputs = CompileInputs {
        topology:  &args.topology,
        config:    args.config.as_deref(),
        routes:    args.routes.as_deref(),
        overrides: args.overrides,
    };
    let network = compile_scenario(&inputs, &args.out)?;

    println!(
        "Compiled {} junctions ({} dead ends, {} traffic lights), {} road edges, {} connections in {:.1?}",
        network.junctions.len(),
        network.dead_ends().count(),
        network.tl_logics.len(),
        network.road_edges.len(),
        network.via_connections.len(),
        t0.elapsed(),
    );
    println!("Output written to {}", args.out.display());
    Ok(())
}

fn run_generate(command: GenerateCommand) -> Result<()> {
    let (generated, out) = match command {
        GenerateCommand::Star { arms, radius, lanes, out } => {
            (star(arms, radius, lanes).context("generating star")?, out)
        }
        GenerateCommand::Corridor { junctions, edge_length, max_lanes, seed, out } => {
            let params = CorridorParams { junctions, edge_length, max_lanes };
            let mut rng = GenRng::new(seed);
            (corridor(params, &mut rng).context("generating corridor")?, out)
        }
    };
    save_generated(&generated, &out)?;
    println!(
        "Generated {} nodes, {} dead ends in {}",
        generated.topology.node_count(),
        generated.topology.dead_end_ids().len(),
        out.display(),
    );
    Ok(())
}

fn run_summary(args: &SummaryArgs) -> Result<()> {
    let summary = NetworkSummary::load(&args.dir)
        .with_context(|| format!("loading scenario {}", args.dir.display()))?;

    let flows = summary.flow_capacities();
    let queues = summary.queue_capacities();
    let positions = summary.positions();

    println!("{:<10} {:>12} {:>12} {:>10} {:>10}", "dead_end", "flow veh/h", "queue veh", "x", "y");
    for dead_end in &summary.dead_ends {
        let point = positions.get(dead_end);
        println!(
            "{:<10} {:>12} {:>12} {:>10} {:>10}",
            dead_end,
            flows.get(dead_end).copied().unwrap_or(0),
            queues.get(dead_end).copied().unwrap_or(0),
            point.map_or(String::new(), |p| format!("{:.1}", p.x)),
            point.map_or(String::new(), |p| format!("{:.1}", p.y)),
        );
    }
    println!();
    for axis in &summary.layout.main {
        println!("main axis {axis}");
    }
    for axis in &summary.layout.side {
        println!("side axis {axis}");
    }
    println!("boundary flow capacity: {} veh/h", summary.flow_capacity());
    println!("network queue capacity: {} veh", summary.queue_capacity());

    if let Some(path) = &args.csv {
        summary
            .write_capacities_csv_file(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Capacities written to {}", path.display());
    }
    Ok(())
}
