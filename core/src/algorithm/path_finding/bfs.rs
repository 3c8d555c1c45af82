//! Breadth-first augmenting paths and layer computation
//!
//! The breadth-first path is a shortest augmenting path in edge count, which
//! is what gives Edmonds-Karp its polynomial bound and what makes every
//! length-`d` path respect the Dinic level graph.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::trace;

use super::{reconstruct_path, AugmentingSearch, Layer};
use crate::data_structures::network::{FlowNetwork, VertexId};

/// Breadth-first search from `source` to the sink over live adjacency
pub fn breadth_first_search(network: &FlowNetwork, source: VertexId) -> AugmentingSearch {
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
    let mut queue = VecDeque::from([source]);
    let mut explored = 0;
    discovered[source] = true;

    while let Some(vertex) = queue.pop_front() {
        explored += 1;
        for &next in &adjacency[vertex] {
            if discovered[next] {
                continue;
            }
            discovered[next] = true;
            parents[next] = Some(vertex);
            if next == sink {
                let path = reconstruct_path(&parents, sink);
                trace!("BFS reached sink after {} dequeues: {:?}", explored, path);
                return AugmentingSearch { path, explored };
            }
            queue.push_back(next);
        }
    }

    AugmentingSearch {
        path: vec![source],
        explored,
    }
}

/// Shortest augmenting path, or `[source]` when none exists
pub fn breadth_first_augmenting_path(network: &FlowNetwork, source: VertexId) -> Vec<VertexId> {
    breadth_first_search(network, source).path
}

/// Breadth-first distance of every vertex from `source` in the residual graph
///
/// Unreachable vertices get `None`.
pub fn breadth_first_layers(network: &FlowNetwork, source: VertexId) -> Vec<Layer> {
    let order = network.order();
    let mut layers: Vec<Layer> = vec![None; order];
    if source >= order {
        return layers;
    }

    let adjacency = network.neighbors();
    let mut queue = VecDeque::from([source]);
    layers[source] = Some(0);

    while let Some(vertex) = queue.pop_front() {
        let depth = layers[vertex].unwrap_or_default();
        for &next in &adjacency[vertex] {
            if layers[next].is_none() {
                layers[next] = Some(depth + 1);
                queue.push_back(next);
            }
        }
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond_with_detour() -> FlowNetwork {
        let mut network = FlowNetwork::directed(5);
        network.add_edge(0, 1, 1).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(2, 4, 1).unwrap();
        network.add_edge(0, 3, 1).unwrap();
        network.add_edge(3, 4, 1).unwrap();
        network
    }

    #[test]
    fn test_shortest_path_is_returned() {
        let network = diamond_with_detour();
        assert_eq!(breadth_first_augmenting_path(&network, 0), vec![0, 3, 4]);
    }

    #[test]
    fn test_layers_cover_all_reachable_vertices() {
        let network = diamond_with_detour();
        let layers = breadth_first_layers(&network, 0);
        assert_eq!(layers, vec![Some(0), Some(1), Some(2), Some(1), Some(2)]);
    }

    #[test]
    fn test_unreachable_layers_are_none() {
        let mut network = FlowNetwork::directed(4);
        network.add_edge(0, 1, 2).unwrap();
        network.add_edge(2, 3, 2).unwrap();

        let layers = breadth_first_layers(&network, 0);
        assert_eq!(layers, vec![Some(0), Some(1), None, None]);
        assert_eq!(breadth_first_augmenting_path(&network, 0), vec![0]);
    }

    #[test]
    fn test_reverse_residual_edges_are_followed() {
        let mut network = FlowNetwork::directed(3);
        network.add_edge(1, 0, 1).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(0, 1, 0).unwrap();
        network.push_flow(1, 0, 1).unwrap();

        // Pushing along (1, 0) opened the residual edge (0, 1)
        assert_eq!(breadth_first_augmenting_path(&network, 0), vec![0, 1, 2]);
    }
}
