//! Augmenting-path maximum flow algorithms
//!
//! This module implements the classical augmenting-path family on the shared
//! residual [`FlowNetwork`]: Ford-Fulkerson with depth-first path search and
//! Edmonds-Karp with breadth-first (shortest) path search. Dinic's layered
//! variant lives in [`super::dinic`] and reuses the augmentation primitives
//! defined here.
//!
//! # Augmentation Protocol
//!
//! For a path `s = v0, v1, ..., vk = t` with bottleneck `b`, every edge
//! `(u, v)` on the path receives `residual[u][v] -= b`, `residual[v][u] += b`
//! and `used[u][v] += b`; adjacency drops `v` from `u` when the forward
//! residual hits zero and gains `u` at `v` when the reverse residual first
//! becomes positive.
//!
//! # Termination
//!
//! With integer capacities every augmentation raises the flow by at least one
//! unit, so both loops terminate. Edmonds-Karp additionally bounds the number
//! of augmentations by `O(V·E)`; Ford-Fulkerson has no such bound.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::dinic::dinic;
use crate::algorithm::path_finding::{breadth_first_search, depth_first_search, AugmentingSearch};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, AlgorithmParameter,
    AlgorithmProfiler, ExecutionResult,
};
use crate::data_structures::network::{Capacity, FlowNetwork, NetworkError, VertexId};
use crate::execution::tracer::{ExecutionTracer, ReportMode, SnapshotStage, TraceEvent};

/// Maximum flow algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaxFlowAlgorithm {
    /// Ford-Fulkerson with DFS path finding
    FordFulkerson,
    /// Edmonds-Karp with BFS shortest augmenting paths
    EdmondsKarp,
    /// Dinic's layered blocking-flow phases
    Dinic,
}

impl MaxFlowAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            MaxFlowAlgorithm::FordFulkerson => "Ford-Fulkerson",
            MaxFlowAlgorithm::EdmondsKarp => "Edmonds-Karp",
            MaxFlowAlgorithm::Dinic => "Dinic",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            MaxFlowAlgorithm::FordFulkerson => "ford_fulkerson",
            MaxFlowAlgorithm::EdmondsKarp => "edmonds_karp",
            MaxFlowAlgorithm::Dinic => "dinic",
        }
    }
}

/// Outcome of one max-flow run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOutcome {
    /// Total flow pushed from source to sink
    pub max_flow: Capacity,
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Level-graph phases (Dinic); equals `augmentations` for the others
    pub phases: usize,
    /// Vertices taken off a search frontier across all searches
    pub nodes_explored: usize,
}

/// Minimum residual capacity over consecutive path edges
///
/// Returns zero for a path with fewer than two vertices.
pub fn bottleneck(network: &FlowNetwork, path: &[VertexId]) -> Capacity {
    path.windows(2)
        .map(|pair| network.residual_capacity(pair[0], pair[1]))
        .min()
        .unwrap_or(0)
}

/// Add one augmentation to a running flow total
pub(crate) fn accumulate_flow(total: Capacity, amount: Capacity) -> Result<Capacity, NetworkError> {
    total.checked_add(amount).ok_or(NetworkError::TotalOverflow {
        quantity: "maximum flow",
    })
}

/// Push `amount` along every edge of `path`
pub fn augment_path(
    network: &mut FlowNetwork,
    path: &[VertexId],
    amount: Capacity,
) -> Result<(), NetworkError> {
    for pair in path.windows(2) {
        network.push_flow(pair[0], pair[1], amount)?;
    }
    Ok(())
}

/// Ford-Fulkerson: augment along depth-first paths until none remains
pub fn ford_fulkerson(
    network: &mut FlowNetwork,
    tracer: &mut ExecutionTracer,
) -> Result<FlowOutcome, NetworkError> {
    augment_until_exhausted(network, tracer, depth_first_search)
}

/// Edmonds-Karp: augment along shortest paths until none remains
pub fn edmonds_karp(
    network: &mut FlowNetwork,
    tracer: &mut ExecutionTracer,
) -> Result<FlowOutcome, NetworkError> {
    augment_until_exhausted(network, tracer, breadth_first_search)
}

fn augment_until_exhausted(
    network: &mut FlowNetwork,
    tracer: &mut ExecutionTracer,
    search: fn(&FlowNetwork, VertexId) -> AugmentingSearch,
) -> Result<FlowOutcome, NetworkError> {
    let mut outcome = FlowOutcome::default();
    let Some(source) = network.source() else {
        return Ok(outcome);
    };

    loop {
        let found = search(network, source);
        outcome.nodes_explored += found.explored;
        if !found.found() {
            break;
        }

        let amount = bottleneck(network, &found.path);
        let total = accumulate_flow(outcome.max_flow, amount)?;
        tracer.snapshot(SnapshotStage::Current, network);
        augment_path(network, &found.path, amount)?;

        outcome.max_flow = total;
        outcome.augmentations += 1;
        debug!(
            "Augmentation {}: {:?} ==> {}",
            outcome.augmentations, found.path, amount
        );
        tracer.record_with(|| TraceEvent::AugmentingPath {
            iteration: outcome.augmentations,
            path: found.path,
            bottleneck: amount,
        });
        tracer.snapshot(SnapshotStage::Generated, network);
    }

    outcome.phases = outcome.augmentations;
    Ok(outcome)
}

/// Max-flow solver dispatching to the selected algorithm
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    algorithm: MaxFlowAlgorithm,
}

impl MaxFlowSolver {
    pub fn new(algorithm: MaxFlowAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Run the selected algorithm without compatibility checks or timing
    pub fn solve(
        &self,
        network: &mut FlowNetwork,
        tracer: &mut ExecutionTracer,
    ) -> Result<FlowOutcome, NetworkError> {
        let outcome = match self.algorithm {
            MaxFlowAlgorithm::FordFulkerson => ford_fulkerson(network, tracer)?,
            MaxFlowAlgorithm::EdmondsKarp => edmonds_karp(network, tracer)?,
            MaxFlowAlgorithm::Dinic => dinic(network, tracer)?,
        };
        debug_assert!(network.verify_invariants().is_ok());
        Ok(outcome)
    }
}

impl Algorithm for MaxFlowSolver {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new(self.algorithm.slug())
    }

    fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        match self.algorithm {
            MaxFlowAlgorithm::FordFulkerson => {
                "Ford-Fulkerson: repeatedly augments along depth-first residual paths; \
                 terminates for integer capacities but may need up to |f*| augmentations."
                    .to_string()
            }
            MaxFlowAlgorithm::EdmondsKarp => {
                "Edmonds-Karp: augments along breadth-first shortest residual paths, \
                 bounding the number of augmentations by O(V·E)."
                    .to_string()
            }
            MaxFlowAlgorithm::Dinic => {
                "Dinic: saturates the BFS level graph with a blocking flow per phase; \
                 at most V phases since the source-sink distance strictly increases."
                    .to_string()
            }
        }
    }

    fn complexity(&self) -> AlgorithmComplexity {
        let (time, worst) = match self.algorithm {
            MaxFlowAlgorithm::FordFulkerson => ("O(E·|f*|)", "O(E·|f*|)"),
            MaxFlowAlgorithm::EdmondsKarp => ("O(V·E²)", "O(V·E²)"),
            MaxFlowAlgorithm::Dinic => ("O(V²·E)", "O(V²·E)"),
        };
        AlgorithmComplexity {
            time_complexity: time.to_string(),
            space_complexity: "O(V²)".to_string(),
            best_case: "O(V + E)".to_string(),
            average_case: time.to_string(),
            worst_case: worst.to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        Vec::new()
    }

    fn set_parameter(&mut self, name: &str, _value: &str) -> Result<(), AlgorithmError> {
        Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("{} takes no parameters", self.algorithm.name()),
        })
    }

    fn get_parameter(&self, _name: &str) -> Option<String> {
        None
    }

    fn execute_with_tracing(
        &mut self,
        network: &mut FlowNetwork,
        tracer: Option<&mut ExecutionTracer>,
    ) -> Result<ExecutionResult, AlgorithmError> {
        self.is_compatible_with(network)?;

        let mut silent;
        let tracer = match tracer {
            Some(tracer) => tracer,
            None => {
                silent = ExecutionTracer::new(ReportMode::Timing);
                &mut silent
            }
        };

        let mut profiler = AlgorithmProfiler::new();
        profiler.start();
        tracer.begin();

        let outcome = self.solve(network, tracer)?;

        profiler.stop();
        tracer.complete(self.name(), outcome.max_flow);
        for _ in 0..outcome.augmentations {
            profiler.record_step();
        }
        for _ in 0..outcome.phases {
            profiler.record_phase();
        }
        profiler.record_nodes_explored(outcome.nodes_explored);

        info!(
            "{} finished: max flow {} after {} augmentations in {} phases",
            self.name(),
            outcome.max_flow,
            outcome.augmentations,
            outcome.phases
        );

        Ok(ExecutionResult {
            optimum: outcome.max_flow,
            partition: None,
            metrics: profiler.get_metrics(),
        })
    }
}
