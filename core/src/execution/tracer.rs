//! Execution tracing for flow and cut algorithms
//!
//! The tracer is the reporting surface of the core: algorithms emit discrete
//! [`TraceEvent`]s (residual snapshots, augmenting paths, phases,
//! contractions) and an external reporter decides how to render them.
//! [`ReportMode::Timing`] suppresses per-iteration events and keeps only the
//! completion event with its wall-clock time.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::data_structures::network::{Capacity, FlowNetwork, VertexId};

/// Reporting verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Record every path, matrix and contraction event
    #[default]
    Trace,
    /// Record only the completion event and elapsed time
    Timing,
}

/// When a residual snapshot was taken relative to an augmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStage {
    /// Residual matrix the augmenting path was found in
    Current,
    /// Residual matrix generated by the augmentation
    Generated,
}

/// Discrete event emitted by an algorithm run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    ResidualSnapshot {
        stage: SnapshotStage,
        matrix: Vec<Vec<Capacity>>,
    },
    AugmentingPath {
        iteration: usize,
        path: Vec<VertexId>,
        bottleneck: Capacity,
    },
    PhaseStarted {
        phase: usize,
        sink_distance: usize,
    },
    Contraction {
        kept: VertexId,
        absorbed: VertexId,
    },
    Partition {
        group_a: Vec<VertexId>,
        group_b: Vec<VertexId>,
    },
    Completed {
        algorithm: String,
        optimum: Capacity,
        elapsed: Duration,
    },
}

/// Collects events for one or more algorithm runs
#[derive(Debug, Clone)]
pub struct ExecutionTracer {
    mode: ReportMode,
    events: Vec<TraceEvent>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl ExecutionTracer {
    pub fn new(mode: ReportMode) -> Self {
        Self {
            mode,
            events: Vec::new(),
            started: None,
            elapsed: None,
        }
    }

    #[inline]
    pub fn is_tracing(&self) -> bool {
        self.mode == ReportMode::Trace
    }

    /// Mark the beginning of a run
    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    /// Record a per-iteration event; built lazily, dropped in timing mode
    pub fn record_with<F>(&mut self, event: F)
    where
        F: FnOnce() -> TraceEvent,
    {
        if self.is_tracing() {
            self.events.push(event());
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.record_with(|| event);
    }

    /// Snapshot the residual matrix of `network`
    pub fn snapshot(&mut self, stage: SnapshotStage, network: &FlowNetwork) {
        self.record_with(|| TraceEvent::ResidualSnapshot {
            stage,
            matrix: network.residual().to_vec(),
        });
    }

    /// Close the run and record its optimum; always recorded
    pub fn complete(&mut self, algorithm: &str, optimum: Capacity) -> Duration {
        let elapsed = self
            .started
            .take()
            .map(|start| start.elapsed())
            .unwrap_or_default();
        self.elapsed = Some(elapsed);
        self.events.push(TraceEvent::Completed {
            algorithm: algorithm.to_string(),
            optimum,
            elapsed,
        });
        elapsed
    }

    /// Wall-clock time of the last completed run
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Augmenting paths recorded so far, in order
    pub fn augmenting_paths(&self) -> impl Iterator<Item = (&[VertexId], Capacity)> + '_ {
        self.events.iter().filter_map(|event| match event {
            TraceEvent::AugmentingPath {
                path, bottleneck, ..
            } => Some((path.as_slice(), *bottleneck)),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Default for ExecutionTracer {
    fn default() -> Self {
        Self::new(ReportMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_mode_suppresses_iteration_events() {
        let mut tracer = ExecutionTracer::new(ReportMode::Timing);
        tracer.begin();
        tracer.record(TraceEvent::AugmentingPath {
            iteration: 1,
            path: vec![0, 1],
            bottleneck: 3,
        });
        tracer.snapshot(SnapshotStage::Current, &FlowNetwork::directed(2));
        tracer.complete("Dinic", 3);

        assert_eq!(tracer.events().len(), 1);
        assert!(matches!(
            tracer.events()[0],
            TraceEvent::Completed { optimum: 3, .. }
        ));
        assert!(tracer.elapsed().is_some());
    }

    #[test]
    fn test_trace_mode_records_paths() {
        let mut tracer = ExecutionTracer::new(ReportMode::Trace);
        tracer.record(TraceEvent::AugmentingPath {
            iteration: 1,
            path: vec![0, 2, 3],
            bottleneck: 2,
        });

        let paths: Vec<_> = tracer.augmenting_paths().collect();
        assert_eq!(paths, vec![(&[0usize, 2, 3][..], 2)]);
    }

    #[test]
    fn test_events_serialize_with_tag() {
        let mut tracer = ExecutionTracer::default();
        tracer.record(TraceEvent::Contraction { kept: 1, absorbed: 4 });

        let json = tracer.to_json().unwrap();
        assert!(json.contains("\"event\": \"contraction\""));
        assert!(json.contains("\"absorbed\": 4"));
    }
}
