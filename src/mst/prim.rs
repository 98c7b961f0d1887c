//! Prim's algorithm as an alternative msb-MST provider.
//!
//! Grows the tree from vertex 0 with a binary heap of candidate edges.
//! The result is a weight-minimum spanning tree, which is in particular
//! minimum under the msb order the driver relies on.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::graph::{WeightedEdge, WeightedGraph};

use super::MstAlgorithm;

/// Binary-heap Prim, grown from vertex 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

impl MstAlgorithm for Prim {
    fn find_solution(&self, g: &WeightedGraph) -> Result<WeightedGraph> {
        let n = g.num_vertices();
        let mut mst = WeightedGraph::new(n)?;
        let mut in_tree = vec![false; n];
        // (weight, source, target), smallest weight first; ties broken by
        // vertex indices for determinism
        let mut heap: BinaryHeap<Reverse<(i32, usize, usize)>> = BinaryHeap::new();

        in_tree[0] = true;
        for e in g.incident_edges(0) {
            heap.push(Reverse((e.weight, e.source, e.target)));
        }

        while let Some(Reverse((weight, source, target))) = heap.pop() {
            if in_tree[target] {
                continue;
            }
            in_tree[target] = true;
            mst.add_edge(WeightedEdge::new(source, target, weight))?;
            mst.add_edge(WeightedEdge::new(target, source, weight))?;
            for e in g.incident_edges(target) {
                if !in_tree[e.target] {
                    heap.push(Reverse((e.weight, e.source, e.target)));
                }
            }
        }

        Ok(mst)
    }
}
