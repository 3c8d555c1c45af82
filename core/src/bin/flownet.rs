//! `flownet`: run one flow or cut algorithm over a network description file
//!
//! ```text
//! flownet <ford-fulkerson|edmonds-karp|dinic|karger> <graph-file>
//!         [--undirected] [--timing] [--trials N] [--seed S] [--config FILE] [--json]
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! augmentation as it happens.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use flowlab_core::{
    load_network_or_empty, AlgorithmKind, Capacity, Directedness, ExecutionTracer, FlowNetwork,
    ReportMode, SnapshotStage, SolverConfig, TraceEvent,
};

#[derive(Debug, Parser)]
#[command(name = "flownet", version, about = "Max-flow and min-cut runner")]
struct Cli {
    /// ford-fulkerson, edmonds-karp, dinic or karger
    algorithm: AlgorithmKind,

    /// Network description file
    graph_file: PathBuf,

    /// Install every edge in both directions
    #[arg(long)]
    undirected: bool,

    /// Report elapsed time only
    #[arg(long)]
    timing: bool,

    /// Independent Karger trials
    #[arg(long)]
    trials: Option<usize>,

    /// Base seed for Karger trials
    #[arg(long)]
    seed: Option<u64>,

    /// JSON solver configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dump the recorded events as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn solver_config(&self) -> Result<SolverConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::from_json_file(path)?,
            None => SolverConfig::default(),
        };
        if self.undirected {
            config.directedness = Directedness::Undirected;
        }
        if self.timing {
            config.report_mode = ReportMode::Timing;
        }
        if let Some(trials) = self.trials {
            config.karger_trials = trials;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_matrix(matrix: &[Vec<Capacity>]) {
    for row in matrix {
        let cells: Vec<String> = row.iter().map(|c| format!("{:>4}", c)).collect();
        println!("{}", cells.join(""));
    }
}

fn print_event(event: &TraceEvent) {
    match event {
        TraceEvent::ResidualSnapshot { stage, matrix } => {
            match stage {
                SnapshotStage::Current => println!("---Current Adjacency Matrix:---"),
                SnapshotStage::Generated => println!("---Generated Residual Matrix:---"),
            }
            print_matrix(matrix);
        }
        TraceEvent::AugmentingPath {
            iteration,
            path,
            bottleneck,
        } => println!("Augmenting path {}: {:?} ==> {}", iteration, path, bottleneck),
        TraceEvent::PhaseStarted {
            phase,
            sink_distance,
        } => println!("Phase {}: length from source to terminal {}", phase, sink_distance),
        TraceEvent::Contraction { kept, absorbed } => {
            println!("Combined vertices {} and {}", kept, absorbed)
        }
        TraceEvent::Partition { group_a, group_b } => {
            println!("Group A: {:?}", group_a);
            println!("Group B: {:?}", group_b);
        }
        TraceEvent::Completed { .. } => {}
    }
}

fn print_usage(network: &FlowNetwork) {
    for usage in network.usage_report() {
        println!("{}", usage);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.solver_config()?;

    let report = load_network_or_empty(&cli.graph_file, config.directedness)?;
    if report.fallback.is_some() {
        println!("File not found.");
    }
    let mut network = report.network;
    if network.edge_count() == 0 {
        println!("Empty graph. Load valid graph first.");
        return Ok(());
    }

    let mut solver = cli.algorithm.instantiate(&config);
    let mut tracer = ExecutionTracer::new(config.report_mode);
    let result = solver.execute_with_tracing(&mut network, Some(&mut tracer))?;

    if cli.json {
        println!("{}", tracer.to_json()?);
        return Ok(());
    }

    for event in tracer.events() {
        print_event(event);
    }
    println!("Optimal Flow: {}", result.optimum);
    if result.partition.is_none() {
        print_usage(&network);
    }
    if config.report_mode == ReportMode::Timing {
        if let Some(elapsed) = tracer.elapsed() {
            println!("Time: {} ms", elapsed.as_secs_f64() * 1000.0);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
