//! Adjacency-list storage for weighted directed graphs.
//!
//! Undirected graphs are stored as two directed copies per edge sharing the
//! same weight. The store is append-only: edges are added during
//! construction and the graph is read-only afterwards. Incident edges are
//! iterated in insertion order, which downstream code relies on for
//! deterministic tie-breaking.

use crate::error::{Result, SsspError};

/// Largest edge weight accepted by the store.
pub const MAX_EDGE_WEIGHT: i32 = i32::MAX;

/// A directed edge with a positive 32-bit weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdge {
    pub source: usize,
    pub target: usize,
    pub weight: i32,
}

impl WeightedEdge {
    pub fn new(source: usize, target: usize, weight: i32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// A weighted directed graph over the vertex set `0..n`.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<WeightedEdge>>,
    num_edges: usize,
}

impl WeightedGraph {
    /// Creates a graph with `n` vertices and no edges.
    ///
    /// A graph must have at least one vertex.
    pub fn new(n: usize) -> Result<Self> {
        if n < 1 {
            return Err(SsspError::InvalidInput(
                "a graph needs at least one vertex".into(),
            ));
        }
        Ok(Self {
            adjacency: vec![Vec::new(); n],
            num_edges: 0,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Adds a directed edge.
    ///
    /// Rejects endpoints outside `0..n`, self-loops and non-positive
    /// weights with [`SsspError::InvalidInput`], and a duplicate ordered
    /// pair with [`SsspError::ParallelEdge`].
    pub fn add_edge(&mut self, edge: WeightedEdge) -> Result<()> {
        let n = self.num_vertices();
        if edge.source >= n || edge.target >= n {
            return Err(SsspError::InvalidInput(format!(
                "allowed vertex indices are 0..{}",
                n - 1
            )));
        }
        if edge.source == edge.target {
            return Err(SsspError::InvalidInput(format!(
                "self-loop at vertex {}",
                edge.source
            )));
        }
        if edge.weight < 1 {
            return Err(SsspError::InvalidInput(format!(
                "edge weight {} is not positive",
                edge.weight
            )));
        }
        if self.has_edge(edge.source, edge.target) {
            return Err(SsspError::ParallelEdge {
                u: edge.source,
                target: edge.target,
            });
        }
        self.adjacency[edge.source].push(edge);
        self.num_edges += 1;
        Ok(())
    }

    /// Adds both directed copies of an undirected edge.
    pub fn add_undirected_edge(&mut self, u: usize, v: usize, weight: i32) -> Result<()> {
        self.add_edge(WeightedEdge::new(u, v, weight))?;
        self.add_edge(WeightedEdge::new(v, u, weight))
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency
            .get(i)
            .is_some_and(|edges| edges.iter().any(|e| e.target == j))
    }

    /// Edges leaving vertex `i`, in insertion order.
    ///
    /// # Panics
    /// Panics if `i` is not a vertex of this graph.
    pub fn incident_edges(&self, i: usize) -> &[WeightedEdge] {
        &self.adjacency[i]
    }

    /// All directed edges, grouped by source vertex.
    pub fn edges(&self) -> impl Iterator<Item = &WeightedEdge> {
        self.adjacency.iter().flatten()
    }
}
