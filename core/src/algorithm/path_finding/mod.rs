//! Augmenting-path search over the residual adjacency view
//!
//! Stateless traversal routines shared by the flow algorithms. Every search
//! starts at the given source and targets the fixed sink `order - 1`. A
//! search that cannot reach the sink returns the sentinel path `[source]`;
//! callers distinguish it from a real path by `path.len() <= 1`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod bfs;
pub mod dfs;

pub use self::bfs::{breadth_first_augmenting_path, breadth_first_layers, breadth_first_search};
pub use self::dfs::{depth_first_augmenting_path, depth_first_search};

use crate::data_structures::network::VertexId;

/// Breadth-first distance of a vertex; `None` when unreachable
pub type Layer = Option<usize>;

/// Result of one augmenting-path search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingSearch {
    /// Source-to-sink vertex sequence, or `[source]` when none exists
    pub path: Vec<VertexId>,
    /// Vertices taken off the frontier during the search
    pub explored: usize,
}

impl AugmentingSearch {
    /// Whether a real augmenting path was found
    #[inline]
    pub fn found(&self) -> bool {
        self.path.len() > 1
    }
}

/// Walk parent pointers back from `sink` and return the path source-first
pub(crate) fn reconstruct_path(parents: &[Option<VertexId>], sink: VertexId) -> Vec<VertexId> {
    let mut path = vec![sink];
    let mut current = sink;
    while let Some(parent) = parents[current] {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
