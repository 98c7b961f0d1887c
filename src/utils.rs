//! Assorted small helpers shared by the MST algorithms and the
//! component-tree builder.

use crate::graph::{WeightedEdge, WeightedGraph};

/// Index of the most significant 1-bit of a positive weight; 0 for 1.
#[inline]
pub(crate) fn msb(value: i32) -> i32 {
    debug_assert!(value > 0, "msb of non-positive value");
    31 - value.leading_zeros() as i32
}

/// One directed representative (`source < target`) per undirected edge of
/// `g`, bucket-sorted by `msb(weight)` ascending. Within a bucket the
/// insertion order of the graph is preserved, so the sequence is stable.
pub(crate) fn bucket_sort_undirected_edges(g: &WeightedGraph) -> Vec<WeightedEdge> {
    // msb of a positive i32 is in 0..=30
    let mut buckets: Vec<Vec<WeightedEdge>> = vec![Vec::new(); 31];
    for edge in g.edges() {
        if edge.source < edge.target {
            buckets[msb(edge.weight) as usize].push(*edge);
        }
    }
    buckets.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_of_small_values() {
        assert_eq!(msb(1), 0);
        assert_eq!(msb(2), 1);
        assert_eq!(msb(3), 1);
        assert_eq!(msb(4), 2);
        assert_eq!(msb(255), 7);
        assert_eq!(msb(256), 8);
        assert_eq!(msb(i32::MAX), 30);
    }

    #[test]
    fn bucket_sort_is_stable_and_monotone() {
        let mut g = WeightedGraph::new(5).unwrap();
        g.add_undirected_edge(0, 1, 9).unwrap();
        g.add_undirected_edge(1, 2, 2).unwrap();
        g.add_undirected_edge(2, 3, 8).unwrap();
        g.add_undirected_edge(3, 4, 1).unwrap();
        let sorted = bucket_sort_undirected_edges(&g);
        assert_eq!(sorted.len(), 4);
        let msbs: Vec<i32> = sorted.iter().map(|e| msb(e.weight)).collect();
        let mut expected = msbs.clone();
        expected.sort_unstable();
        assert_eq!(msbs, expected);
        // equal-msb edges keep graph insertion order
        assert_eq!(sorted[1].weight, 9);
        assert_eq!(sorted[2].weight, 8);
    }
}
