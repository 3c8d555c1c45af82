//! Residual flow network with synchronized matrix and adjacency views
//!
//! This module implements the capacitated network consumed by every flow and
//! cut algorithm in FLOWLAB. Three square matrices (residual, original and
//! used) are kept alongside an ordered adjacency list that mirrors the
//! positive entries of the residual matrix.
//!
//! # Invariants
//!
//! 1. **Adjacency Mirror**: `j ∈ neighbors[i] ⟺ residual[i][j] > 0`
//! 2. **Flow Conservation**: for every pair `(i, j)`,
//!    `residual[i][j] + used[i][j] == original[i][j] + used[j][i]`.
//!    When no flow was ever pushed along `(j, i)` this is exactly
//!    `residual + used == original`.
//! 3. **Monotone Usage**: `used[i][j]` never decreases
//! 4. **Monotone Order**: `order` only grows, through `resize`
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vertex identifier in `[0, order)`
pub type VertexId = usize;

/// Capacity and flow quantity
pub type Capacity = i64;

/// Directedness of a network, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directedness {
    /// Edge `(i, j)` says nothing about `(j, i)`
    #[default]
    Directed,
    /// Edge `(i, j, k)` installs capacity `k` in both directions
    Undirected,
}

impl Directedness {
    #[inline]
    pub fn is_directed(self) -> bool {
        matches!(self, Directedness::Directed)
    }
}

impl fmt::Display for Directedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directedness::Directed => f.write_str("directed"),
            Directedness::Undirected => f.write_str("undirected"),
        }
    }
}

/// Edge value object `(start, end, capacity)`
///
/// `capacity` is the bound given at construction time. It is never mutated
/// by the algorithms and only serves reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Tail vertex
    pub start: VertexId,
    /// Head vertex
    pub end: VertexId,
    /// Original capacity
    pub capacity: Capacity,
}

impl Edge {
    pub fn new(start: VertexId, end: VertexId, capacity: Capacity) -> Self {
        Self { start, end, capacity }
    }
}

/// Per-edge utilization line ("x used / y capacity")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeUsage {
    pub start: VertexId,
    pub end: VertexId,
    pub used: Capacity,
    pub capacity: Capacity,
}

impl fmt::Display for EdgeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): {}/{}", self.start, self.end, self.used, self.capacity)
    }
}

/// Validation and consistency errors raised by the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("vertex {vertex} is out of range for a network of order {order}")]
    VertexOutOfRange { vertex: VertexId, order: usize },

    #[error("edge ({start}, {end}) has negative capacity {capacity}")]
    NegativeCapacity {
        start: VertexId,
        end: VertexId,
        capacity: Capacity,
    },

    #[error("cannot record negative flow {amount} on ({start}, {end})")]
    NegativeFlow {
        start: VertexId,
        end: VertexId,
        amount: Capacity,
    },

    #[error("resize from order {current} to {requested} would shrink the network")]
    ShrinkRejected { current: usize, requested: usize },

    #[error("expected a {expected}x{expected} structure, found {found} rows or columns")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("adjacency list of vertex {vertex} does not mirror its residual row")]
    AdjacencyMismatch { vertex: VertexId },

    #[error("capacity or flow on ({start}, {end}) exceeds the i64 range")]
    CapacityOverflow { start: VertexId, end: VertexId },

    #[error("{quantity} exceeds the i64 range")]
    TotalOverflow { quantity: &'static str },

    #[error("network invariant violated: {0}")]
    InvariantViolated(String),
}

/// Capacitated network with residual, original and used matrices
///
/// The network is populated by repeated [`FlowNetwork::add_edge`] calls and
/// then mutated in place by exactly one algorithm run. It assumes exclusive
/// access for the duration of that run; work on clones to compare algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// Directed or undirected variant
    directedness: Directedness,
    /// Remaining pushable capacity, mutated by flow algorithms
    residual: Vec<Vec<Capacity>>,
    /// Capacity at construction time
    original: Vec<Vec<Capacity>>,
    /// Cumulative flow pushed along each ordered pair
    used: Vec<Vec<Capacity>>,
    /// Live adjacency view, ordered by insertion
    neighbors: Vec<Vec<VertexId>>,
    /// Number of edge entries added (undirected edges count twice, self-loops once)
    edge_count: usize,
}

impl FlowNetwork {
    /// Create a network of `order` vertices and no edges
    pub fn new(directedness: Directedness, order: usize) -> Self {
        Self {
            directedness,
            residual: vec![vec![0; order]; order],
            original: vec![vec![0; order]; order],
            used: vec![vec![0; order]; order],
            neighbors: vec![Vec::new(); order],
            edge_count: 0,
        }
    }

    pub fn directed(order: usize) -> Self {
        Self::new(Directedness::Directed, order)
    }

    pub fn undirected(order: usize) -> Self {
        Self::new(Directedness::Undirected, order)
    }

    /// Order-0 network used as a fallback when no input is available
    pub fn empty(directedness: Directedness) -> Self {
        Self::new(directedness, 0)
    }

    #[inline]
    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    /// Number of vertices
    #[inline]
    pub fn order(&self) -> usize {
        self.residual.len()
    }

    /// Number of edge entries added so far
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Fixed source vertex (`0`), if the network has any vertex
    #[inline]
    pub fn source(&self) -> Option<VertexId> {
        (self.order() > 0).then_some(0)
    }

    /// Fixed sink vertex (`order - 1`), if the network has any vertex
    #[inline]
    pub fn sink(&self) -> Option<VertexId> {
        self.order().checked_sub(1)
    }

    /// Whether `residual[i][j] > 0`; out-of-range pairs are never edges
    pub fn is_edge(&self, i: VertexId, j: VertexId) -> bool {
        self.residual
            .get(i)
            .and_then(|row| row.get(j))
            .is_some_and(|&capacity| capacity > 0)
    }

    /// Add an edge, accumulating capacity onto any parallel edge
    ///
    /// Fails without touching the network if either endpoint is out of
    /// range, the capacity is negative, or an accumulated entry would leave
    /// the `i64` range. An undirected self-loop has a single entry and counts
    /// once.
    pub fn add_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        capacity: Capacity,
    ) -> Result<(), NetworkError> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;
        if capacity < 0 {
            return Err(NetworkError::NegativeCapacity { start, end, capacity });
        }

        let mirrored = self.directedness == Directedness::Undirected && start != end;
        self.check_headroom(start, end, capacity)?;
        if mirrored {
            self.check_headroom(end, start, capacity)?;
        }

        self.install(start, end, capacity);
        if mirrored {
            self.install(end, start, capacity);
            self.edge_count += 2;
        } else {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Add an [`Edge`] value object
    pub fn insert(&mut self, edge: Edge) -> Result<(), NetworkError> {
        self.add_edge(edge.start, edge.end, edge.capacity)
    }

    fn check_headroom(
        &self,
        start: VertexId,
        end: VertexId,
        capacity: Capacity,
    ) -> Result<(), NetworkError> {
        let fits = self.residual[start][end].checked_add(capacity).is_some()
            && self.original[start][end].checked_add(capacity).is_some();
        if fits {
            Ok(())
        } else {
            Err(NetworkError::CapacityOverflow { start, end })
        }
    }

    /// Caller has checked headroom
    fn install(&mut self, start: VertexId, end: VertexId, capacity: Capacity) {
        let was_live = self.residual[start][end] > 0;
        self.residual[start][end] += capacity;
        self.original[start][end] += capacity;
        if !was_live && self.residual[start][end] > 0 {
            self.neighbors[start].push(end);
        }
    }

    /// Grow the network to `new_order` vertices
    ///
    /// Existing residual, original and used values are preserved; new rows
    /// and columns start empty. Shrinking is rejected.
    pub fn resize(&mut self, new_order: usize) -> Result<(), NetworkError> {
        let current = self.order();
        if new_order < current {
            return Err(NetworkError::ShrinkRejected {
                current,
                requested: new_order,
            });
        }
        for matrix in [&mut self.residual, &mut self.original, &mut self.used] {
            for row in matrix.iter_mut() {
                row.resize(new_order, 0);
            }
            matrix.resize_with(new_order, || vec![0; new_order]);
        }
        self.neighbors.resize_with(new_order, Vec::new);
        Ok(())
    }

    /// Add `amount` to the cumulative flow recorded on `(start, end)`
    pub fn record_flow(
        &mut self,
        start: VertexId,
        end: VertexId,
        amount: Capacity,
    ) -> Result<(), NetworkError> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;
        if amount < 0 {
            return Err(NetworkError::NegativeFlow { start, end, amount });
        }
        self.used[start][end] = self.used[start][end]
            .checked_add(amount)
            .ok_or(NetworkError::CapacityOverflow { start, end })?;
        Ok(())
    }

    /// Push `amount` units along the residual edge `(u, v)`
    ///
    /// Decrements `residual[u][v]`, increments `residual[v][u]`, records the
    /// flow in `used[u][v]` and keeps both adjacency entries in step.
    pub fn push_flow(
        &mut self,
        u: VertexId,
        v: VertexId,
        amount: Capacity,
    ) -> Result<(), NetworkError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if amount < 0 {
            return Err(NetworkError::NegativeFlow {
                start: u,
                end: v,
                amount,
            });
        }
        if amount > self.residual[u][v] {
            return Err(NetworkError::InvariantViolated(format!(
                "pushing {} along ({}, {}) exceeds residual capacity {}",
                amount, u, v, self.residual[u][v]
            )));
        }
        if amount == 0 {
            return Ok(());
        }

        let overflow = NetworkError::CapacityOverflow { start: u, end: v };
        let reverse = self.residual[v][u].checked_add(amount).ok_or(overflow.clone())?;
        let used = self.used[u][v].checked_add(amount).ok_or(overflow)?;
        let reverse_was_empty = self.residual[v][u] == 0;

        self.residual[u][v] -= amount;
        self.residual[v][u] = reverse;
        self.used[u][v] = used;

        if self.residual[u][v] == 0 {
            self.neighbors[u].retain(|&w| w != v);
        }
        if reverse_was_empty {
            self.neighbors[v].push(u);
        }
        Ok(())
    }

    #[inline]
    pub fn residual(&self) -> &[Vec<Capacity>] {
        &self.residual
    }

    #[inline]
    pub fn original(&self) -> &[Vec<Capacity>] {
        &self.original
    }

    #[inline]
    pub fn used(&self) -> &[Vec<Capacity>] {
        &self.used
    }

    #[inline]
    pub fn neighbors(&self) -> &[Vec<VertexId>] {
        &self.neighbors
    }

    /// Residual capacity of `(i, j)`, zero when out of range
    #[inline]
    pub fn residual_capacity(&self, i: VertexId, j: VertexId) -> Capacity {
        self.residual
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(0)
    }

    /// Replace the residual matrix and rebuild adjacency from it
    ///
    /// Existing neighbor order is kept for entries that stay positive; newly
    /// positive entries are appended in column order.
    pub fn replace_residual(&mut self, matrix: Vec<Vec<Capacity>>) -> Result<(), NetworkError> {
        let order = self.order();
        Self::check_square(&matrix, order)?;
        for (i, row) in matrix.iter().enumerate() {
            for (j, &capacity) in row.iter().enumerate() {
                if capacity < 0 {
                    return Err(NetworkError::NegativeCapacity {
                        start: i,
                        end: j,
                        capacity,
                    });
                }
            }
        }

        let neighbors = (0..order)
            .map(|i| {
                let mut row: Vec<VertexId> = self.neighbors[i]
                    .iter()
                    .copied()
                    .filter(|&j| matrix[i][j] > 0)
                    .collect();
                for j in 0..order {
                    if matrix[i][j] > 0 && !row.contains(&j) {
                        row.push(j);
                    }
                }
                row
            })
            .collect();

        self.residual = matrix;
        self.neighbors = neighbors;
        Ok(())
    }

    /// Replace the adjacency lists
    ///
    /// The lists must mirror the positive residual entries exactly (any
    /// order, no duplicates); otherwise the network is left unchanged.
    pub fn replace_neighbors(&mut self, lists: Vec<Vec<VertexId>>) -> Result<(), NetworkError> {
        let order = self.order();
        if lists.len() != order {
            return Err(NetworkError::DimensionMismatch {
                expected: order,
                found: lists.len(),
            });
        }
        for (i, row) in lists.iter().enumerate() {
            if let Some(&j) = row.iter().find(|&&j| j >= order) {
                return Err(NetworkError::VertexOutOfRange { vertex: j, order });
            }
            if !self.mirrors_residual_row(i, row) {
                return Err(NetworkError::AdjacencyMismatch { vertex: i });
            }
        }
        self.neighbors = lists;
        Ok(())
    }

    /// Original edges, one entry per ordered pair with positive capacity
    pub fn original_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (i, row) in self.original.iter().enumerate() {
            for (j, &capacity) in row.iter().enumerate() {
                if capacity > 0 {
                    edges.push(Edge::new(i, j, capacity));
                }
            }
        }
        edges
    }

    /// Utilization of every edge that carries flow and had capacity
    pub fn usage_report(&self) -> Vec<EdgeUsage> {
        let mut report = Vec::new();
        for (i, row) in self.used.iter().enumerate() {
            for (j, &used) in row.iter().enumerate() {
                let capacity = self.original[i][j];
                if used != 0 && capacity != 0 {
                    report.push(EdgeUsage {
                        start: i,
                        end: j,
                        used,
                        capacity,
                    });
                }
            }
        }
        report
    }

    /// Net flow leaving `vertex` according to the used matrix
    pub fn net_outflow(&self, vertex: VertexId) -> Result<Capacity, NetworkError> {
        self.check_vertex(vertex)?;
        (0..self.order())
            .map(|w| self.used[vertex][w] - self.used[w][vertex])
            .try_fold(0 as Capacity, Capacity::checked_add)
            .ok_or(NetworkError::TotalOverflow {
                quantity: "net outflow",
            })
    }

    /// Check all structural invariants
    pub fn verify_invariants(&self) -> Result<(), NetworkError> {
        let order = self.order();
        for matrix in [&self.original, &self.used] {
            Self::check_square(matrix, order)?;
        }
        Self::check_square(&self.residual, order)?;
        if self.neighbors.len() != order {
            return Err(NetworkError::DimensionMismatch {
                expected: order,
                found: self.neighbors.len(),
            });
        }

        for i in 0..order {
            if !self.mirrors_residual_row(i, &self.neighbors[i]) {
                return Err(NetworkError::AdjacencyMismatch { vertex: i });
            }
            for j in 0..order {
                if self.residual[i][j] < 0 || self.used[i][j] < 0 {
                    return Err(NetworkError::InvariantViolated(format!(
                        "negative entry at ({}, {})",
                        i, j
                    )));
                }
                let lhs = i128::from(self.residual[i][j]) + i128::from(self.used[i][j]);
                let rhs = i128::from(self.original[i][j]) + i128::from(self.used[j][i]);
                if lhs != rhs {
                    return Err(NetworkError::InvariantViolated(format!(
                        "conservation broken at ({}, {}): residual {} + used {} != original {} + reverse used {}",
                        i, j, self.residual[i][j], self.used[i][j], self.original[i][j], self.used[j][i]
                    )));
                }
            }
        }
        Ok(())
    }

    fn mirrors_residual_row(&self, i: VertexId, row: &[VertexId]) -> bool {
        let positive = self.residual[i].iter().filter(|&&c| c > 0).count();
        if row.len() != positive {
            return false;
        }
        row.iter().enumerate().all(|(idx, &j)| {
            j < self.order() && self.residual[i][j] > 0 && !row[..idx].contains(&j)
        })
    }

    fn check_square<T>(matrix: &[Vec<T>], order: usize) -> Result<(), NetworkError> {
        if matrix.len() != order {
            return Err(NetworkError::DimensionMismatch {
                expected: order,
                found: matrix.len(),
            });
        }
        if let Some(row) = matrix.iter().find(|row| row.len() != order) {
            return Err(NetworkError::DimensionMismatch {
                expected: order,
                found: row.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn check_vertex(&self, vertex: VertexId) -> Result<(), NetworkError> {
        let order = self.order();
        if vertex < order {
            Ok(())
        } else {
            Err(NetworkError::VertexOutOfRange { vertex, order })
        }
    }
}

impl fmt::Display for FlowNetwork {
    /// Residual matrix, one row per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.residual {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
