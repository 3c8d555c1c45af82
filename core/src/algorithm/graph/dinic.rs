//! Dinic's layered blocking-flow algorithm
//!
//! Each phase computes breadth-first layers on the current residual graph and
//! then augments along breadth-first paths whose every edge climbs exactly one
//! layer. Pushing flow only creates residual edges that descend a layer, so a
//! path of the phase's source-sink distance must lie in the level graph; once
//! the breadth-first path leaves the level graph the phase's blocking flow is
//! exhausted and the distance strictly grows in the next phase.
//!
//! # Complexity
//!
//! - At most `V - 1` phases
//! - Each phase performs at most `E` augmentations
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;

use super::max_flow::{accumulate_flow, augment_path, FlowOutcome};
use crate::algorithm::path_finding::{breadth_first_layers, breadth_first_search, Layer};
use crate::data_structures::network::{Capacity, FlowNetwork, NetworkError, VertexId};
use crate::execution::tracer::{ExecutionTracer, SnapshotStage, TraceEvent};

/// Bottleneck restricted to level-graph edges
///
/// Any edge that does not go from layer `L` to `L + 1` counts as zero
/// usable capacity, so a path leaving the level graph yields zero.
pub fn layered_bottleneck(network: &FlowNetwork, path: &[VertexId], layers: &[Layer]) -> Capacity {
    path.windows(2)
        .map(|pair| {
            let (u, v) = (pair[0], pair[1]);
            match (layers[u], layers[v]) {
                (Some(lu), Some(lv)) if lv == lu + 1 => network.residual_capacity(u, v),
                _ => 0,
            }
        })
        .min()
        .unwrap_or(0)
}

/// Run Dinic's algorithm from vertex `0` to vertex `order - 1`
pub fn dinic(
    network: &mut FlowNetwork,
    tracer: &mut ExecutionTracer,
) -> Result<FlowOutcome, NetworkError> {
    let mut outcome = FlowOutcome::default();
    let (Some(source), Some(sink)) = (network.source(), network.sink()) else {
        return Ok(outcome);
    };
    if source == sink {
        return Ok(outcome);
    }

    loop {
        let layers = breadth_first_layers(network, source);
        let Some(sink_distance) = layers[sink] else {
            break;
        };

        outcome.phases += 1;
        debug!(
            "Dinic phase {}: source-sink distance {}",
            outcome.phases, sink_distance
        );
        tracer.record(TraceEvent::PhaseStarted {
            phase: outcome.phases,
            sink_distance,
        });
        tracer.snapshot(SnapshotStage::Current, network);

        loop {
            let found = breadth_first_search(network, source);
            outcome.nodes_explored += found.explored;
            if !found.found() {
                break;
            }

            let amount = layered_bottleneck(network, &found.path, &layers);
            if amount == 0 {
                break;
            }
            let total = accumulate_flow(outcome.max_flow, amount)?;
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
        }

        tracer.snapshot(SnapshotStage::Generated, network);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::tracer::ReportMode;

    fn example_network() -> FlowNetwork {
        let mut network = FlowNetwork::directed(4);
        network.add_edge(0, 1, 3).unwrap();
        network.add_edge(0, 2, 2).unwrap();
        network.add_edge(1, 3, 2).unwrap();
        network.add_edge(2, 3, 3).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network
    }

    #[test]
    fn test_layered_bottleneck_rejects_flat_edges() {
        let network = example_network();
        let layers = breadth_first_layers(&network, 0);

        assert_eq!(layered_bottleneck(&network, &[0, 1, 3], &layers), 2);
        // 1 -> 2 stays inside layer 1
        assert_eq!(layered_bottleneck(&network, &[0, 1, 2, 3], &layers), 0);
    }

    #[test]
    fn test_dinic_example() {
        let mut network = example_network();
        let mut tracer = ExecutionTracer::new(ReportMode::Trace);

        let outcome = dinic(&mut network, &mut tracer).unwrap();
        assert_eq!(outcome.max_flow, 5);
        assert_eq!(outcome.phases, 2);
        assert_eq!(outcome.augmentations, 3);
        assert!(network.verify_invariants().is_ok());

        let distances: Vec<usize> = tracer
            .events()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::PhaseStarted { sink_distance, .. } => Some(*sink_distance),
                _ => None,
            })
            .collect();
        assert_eq!(distances, vec![2, 3]);
    }

    #[test]
    fn test_dinic_without_path() {
        let mut network = FlowNetwork::directed(3);
        network.add_edge(0, 1, 4).unwrap();

        let outcome = dinic(&mut network, &mut ExecutionTracer::default()).unwrap();
        assert_eq!(outcome, FlowOutcome::default());
    }

    #[test]
    fn test_dinic_phases_bounded_by_order() {
        // Chain with shortcut edges forces several phases
        let mut network = FlowNetwork::directed(6);
        for v in 0..5 {
            network.add_edge(v, v + 1, 2).unwrap();
        }
        network.add_edge(0, 5, 1).unwrap();
        network.add_edge(0, 3, 1).unwrap();

        let outcome = dinic(&mut network, &mut ExecutionTracer::default()).unwrap();
        assert_eq!(outcome.max_flow, 3);
        assert!(outcome.phases < network.order());
    }
}
