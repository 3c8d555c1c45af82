//! FLOWLAB core
//!
//! Maximum flow and minimum cut on a shared residual network. Ford-Fulkerson
//! (depth-first augmentation), Edmonds-Karp (breadth-first augmentation) and
//! Dinic (layered blocking flow) compute a maximum flow from vertex `0` to
//! vertex `order - 1`; Karger's randomized contraction estimates a global
//! minimum cut.
//!
//! ```no_run
//! use flowlab_core::{parse_network, AlgorithmKind, Directedness, ExecutionTracer, SolverConfig};
//!
//! let mut network = parse_network("2\n0 1 7\n-1\n", Directedness::Directed)?;
//! let mut solver = AlgorithmKind::Dinic.instantiate(&SolverConfig::default());
//! let mut tracer = ExecutionTracer::default();
//! let result = solver.execute_with_tracing(&mut network, Some(&mut tracer))?;
//! assert_eq!(result.optimum, 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod execution;
pub mod io;

pub use algorithm::graph::{AlgorithmKind, KargerMinCut, MaxFlowAlgorithm, MaxFlowSolver};
pub use algorithm::traits::{Algorithm, AlgorithmError, CutPartition, ExecutionResult};
pub use config::{ConfigError, SolverConfig};
pub use data_structures::network::{
    Capacity, Directedness, Edge, EdgeUsage, FlowNetwork, NetworkError, VertexId,
};
pub use execution::tracer::{ExecutionTracer, ReportMode, SnapshotStage, TraceEvent};
pub use io::loader::{load_network, load_network_or_empty, parse_network, LoadError, LoadReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
