//! Kruskal's algorithm modified for msb-minimum spanning trees.
//!
//! Edges are bucket-sorted by the index of the most significant 1-bit of
//! their weight, which takes linear time and is all the ordering the
//! component hierarchy needs. The usual sweep with a union-find then
//! accepts every edge whose endpoints still lie in different components.

use crate::error::Result;
use crate::graph::{WeightedEdge, WeightedGraph};
use crate::union_find::UnionFind;
use crate::utils::bucket_sort_undirected_edges;

use super::MstAlgorithm;

/// Bucket-sorting Kruskal for the msb-of-weight order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KruskalMsb;

impl MstAlgorithm for KruskalMsb {
    fn find_solution(&self, g: &WeightedGraph) -> Result<WeightedGraph> {
        let n = g.num_vertices();
        let mut uf = UnionFind::new(n);
        let mut mst = WeightedGraph::new(n)?;
        let target_edges = 2 * (n - 1);

        for edge in bucket_sort_undirected_edges(g) {
            if mst.num_edges() >= target_edges {
                break;
            }
            if uf.find(edge.source) != uf.find(edge.target) {
                mst.add_edge(edge)?;
                mst.add_edge(WeightedEdge::new(edge.target, edge.source, edge.weight))?;
                uf.union(edge.source, edge.target);
            }
        }

        Ok(mst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::msb;

    fn spanning_tree_of(g: &WeightedGraph) -> WeightedGraph {
        KruskalMsb.find_solution(g).unwrap()
    }

    #[test]
    fn produces_a_spanning_tree() {
        let mut g = WeightedGraph::new(5).unwrap();
        g.add_undirected_edge(0, 1, 3).unwrap();
        g.add_undirected_edge(1, 2, 5).unwrap();
        g.add_undirected_edge(2, 3, 9).unwrap();
        g.add_undirected_edge(3, 4, 2).unwrap();
        g.add_undirected_edge(0, 4, 7).unwrap();
        g.add_undirected_edge(1, 3, 1).unwrap();
        let mst = spanning_tree_of(&g);
        assert_eq!(mst.num_edges(), 2 * (5 - 1));
        // every vertex is an endpoint of some tree edge
        for v in 0..5 {
            assert!(!mst.incident_edges(v).is_empty());
        }
    }

    #[test]
    fn prefers_lower_msb_classes() {
        // weights 1 and 2 straddle an msb boundary; the heavy edge closes
        // a cycle and must be rejected
        let mut g = WeightedGraph::new(3).unwrap();
        g.add_undirected_edge(0, 1, 1).unwrap();
        g.add_undirected_edge(1, 2, 1).unwrap();
        g.add_undirected_edge(0, 2, 2).unwrap();
        let mst = spanning_tree_of(&g);
        for e in mst.edges() {
            assert_eq!(msb(e.weight), 0);
        }
    }

    #[test]
    fn disconnected_input_yields_partial_forest() {
        let mut g = WeightedGraph::new(4).unwrap();
        g.add_undirected_edge(0, 1, 1).unwrap();
        g.add_undirected_edge(2, 3, 1).unwrap();
        let mst = spanning_tree_of(&g);
        assert_eq!(mst.num_edges(), 4);
        assert!(mst.num_edges() < 2 * (4 - 1));
    }
}
