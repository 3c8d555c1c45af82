//! Core algorithm trait definitions for FLOWLAB
//!
//! Every flow and cut algorithm is exposed through the [`Algorithm`] trait:
//! a uniform surface for identification, string-typed parameters,
//! compatibility checks and traced execution against a [`FlowNetwork`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Debug;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::data_structures::network::{Capacity, FlowNetwork, NetworkError, VertexId};
use crate::execution::tracer::ExecutionTracer;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub constraints: Option<ParameterConstraints>,
}

/// Parameter value type; every tunable in FLOWLAB is an integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
}

/// Parameter constraints for validating algorithm parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Error types for algorithm operations
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid graph state: {0}")]
    InvalidGraph(String),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    /// Augmentations (flow) or contractions (cut) performed
    pub steps_executed: usize,
    /// Level-graph phases (Dinic) or independent trials (Karger)
    pub phases: usize,
    /// Vertices dequeued or popped by the path finders
    pub nodes_explored: usize,
    pub execution_time: Duration,
}

/// Two-sided vertex partition produced by a cut algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutPartition {
    /// Side containing vertex `0`
    pub group_a: Vec<VertexId>,
    pub group_b: Vec<VertexId>,
}

/// Execution result from algorithm invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Max-flow total or min-cut total
    pub optimum: Capacity,
    /// Present for cut algorithms only
    pub partition: Option<CutPartition>,
    pub metrics: AlgorithmMetrics,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
    pub average_case: String,
    pub worst_case: String,
}

/// Main algorithm trait
///
/// # Invariants
/// - One invocation mutates the network in place and assumes exclusive access
/// - Parameters only affect reporting and randomness, never correctness
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (`max_flow` or `min_cut`)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Verifies algorithm can operate on given network
    fn is_compatible_with(&self, network: &FlowNetwork) -> Result<(), AlgorithmError> {
        if network.order() < 2 {
            return Err(AlgorithmError::InvalidGraph(format!(
                "network of order {} has no distinct source and sink",
                network.order()
            )));
        }
        Ok(())
    }

    /// Executes algorithm with optional tracing, mutating `network` in place
    fn execute_with_tracing(
        &mut self,
        network: &mut FlowNetwork,
        tracer: Option<&mut ExecutionTracer>,
    ) -> Result<ExecutionResult, AlgorithmError>;
}

/// Performance profiling integration
#[derive(Debug)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self {
            metrics: AlgorithmMetrics::default(),
            start_time: None,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn record_phase(&mut self) {
        self.metrics.phases += 1;
    }

    pub fn record_nodes_explored(&mut self, count: usize) {
        self.metrics.nodes_explored += count;
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_id_uniqueness() {
        let id1 = AlgorithmId::new("dinic");
        let id2 = AlgorithmId::new("edmonds_karp");
        let id3 = AlgorithmId::new("dinic");

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id1.as_str(), "dinic");
    }

    #[test]
    fn test_profiler_counts() {
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();
        profiler.record_step();
        profiler.record_step();
        profiler.record_phase();
        profiler.record_nodes_explored(7);
        profiler.stop();

        let metrics = profiler.get_metrics();
        assert_eq!(metrics.steps_executed, 2);
        assert_eq!(metrics.phases, 1);
        assert_eq!(metrics.nodes_explored, 7);
    }

    #[test]
    fn test_network_error_converts() {
        let error: AlgorithmError = NetworkError::VertexOutOfRange { vertex: 9, order: 3 }.into();
        assert!(matches!(error, AlgorithmError::Network(_)));
        assert!(error.to_string().contains("out of range"));
    }
}
