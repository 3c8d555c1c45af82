//! Stack-based depth-first augmenting-path search
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::trace;

use super::{reconstruct_path, AugmentingSearch};
use crate::data_structures::network::{FlowNetwork, VertexId};

/// Depth-first search from `source` to the sink over live adjacency
///
/// A parent pointer is recorded the first time each vertex is discovered.
/// The search stops as soon as the sink is discovered.
pub fn depth_first_search(network: &FlowNetwork, source: VertexId) -> AugmentingSearch {
    let order = network.order();
    let sentinel = AugmentingSearch {
        path: vec![source],
        explored: 0,
    };
    let Some(sink) = network.sink() else {
        return sentinel;
    };
    if source >= order || source == sink {
        return sentinel;
    }

    let adjacency = network.neighbors();
    let mut discovered = vec![false; order];
    let mut parents: Vec<Option<VertexId>> = vec![None; order];
    let mut stack = vec![source];
    let mut explored = 0;
    discovered[source] = true;

    while let Some(vertex) = stack.pop() {
        explored += 1;
        for &next in &adjacency[vertex] {
            if discovered[next] {
                continue;
            }
            discovered[next] = true;
            parents[next] = Some(vertex);
            if next == sink {
                let path = reconstruct_path(&parents, sink);
                trace!("DFS reached sink after {} pops: {:?}", explored, path);
                return AugmentingSearch { path, explored };
            }
            stack.push(next);
        }
    }

    trace!("DFS exhausted {} vertices without reaching sink", explored);
    AugmentingSearch {
        path: vec![source],
        explored,
    }
}

/// Depth-first augmenting path, or `[source]` when none exists
pub fn depth_first_augmenting_path(network: &FlowNetwork, source: VertexId) -> Vec<VertexId> {
    depth_first_search(network, source).path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_path_to_sink() {
        let mut network = FlowNetwork::directed(4);
        network.add_edge(0, 1, 1).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(2, 3, 1).unwrap();

        assert_eq!(depth_first_augmenting_path(&network, 0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_explores_most_recent_branch_first() {
        let mut network = FlowNetwork::directed(4);
        network.add_edge(0, 1, 1).unwrap();
        network.add_edge(0, 2, 1).unwrap();
        network.add_edge(1, 3, 1).unwrap();
        network.add_edge(2, 3, 1).unwrap();

        // 2 is pushed last, so it is expanded first
        assert_eq!(depth_first_augmenting_path(&network, 0), vec![0, 2, 3]);
    }

    #[test]
    fn test_sentinel_when_unreachable() {
        let mut network = FlowNetwork::directed(3);
        network.add_edge(0, 1, 5).unwrap();

        let search = depth_first_search(&network, 0);
        assert_eq!(search.path, vec![0]);
        assert!(!search.found());
    }

    #[test]
    fn test_saturated_edges_are_skipped() {
        let mut network = FlowNetwork::directed(2);
        network.add_edge(0, 1, 1).unwrap();
        network.push_flow(0, 1, 1).unwrap();

        assert_eq!(depth_first_augmenting_path(&network, 0), vec![0]);
    }

    #[test]
    fn test_degenerate_networks() {
        assert_eq!(depth_first_augmenting_path(&FlowNetwork::directed(1), 0), vec![0]);
        assert_eq!(depth_first_augmenting_path(&FlowNetwork::directed(0), 0), vec![0]);
    }
}
