//! Reference Dijkstra over the same graph store.
//!
//! Binary heap with lazy deletion; used as the correctness baseline in
//! tests and benchmarks and for cross-checking in the probe binary. Uses
//! the same sentinel conventions as the engine (`i32::MAX` for
//! unreachable).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Result, SsspError};
use crate::graph::WeightedGraph;
use crate::split_findmin::INFINITE_COST;

/// Distances of all vertices from `source`.
pub fn shortest_paths(graph: &WeightedGraph, source: usize) -> Result<Vec<i32>> {
    let n = graph.num_vertices();
    if source >= n {
        return Err(SsspError::InvalidSourceVertex {
            vertex: source,
            num_vertices: n,
        });
    }

    let mut dist = vec![INFINITE_COST; n];
    let mut heap: BinaryHeap<Reverse<(i64, usize)>> = BinaryHeap::new();
    dist[source] = 0;
    heap.push(Reverse((0, source)));

    while let Some(Reverse((d, v))) = heap.pop() {
        if d > dist[v] {
            continue;
        }
        for edge in graph.incident_edges(v) {
            let candidate = d + edge.weight as i64;
            if candidate < dist[edge.target] {
                dist[edge.target] = candidate;
                heap.push(Reverse((candidate, edge.target)));
            }
        }
    }

    Ok(dist
        .into_iter()
        .map(|d| if d == INFINITE_COST { i32::MAX } else { d as i32 })
        .collect())
}
