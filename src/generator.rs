//! Random connected graph generation for tests and benchmarks.

use rand::Rng;

use crate::graph::WeightedGraph;

/// Generates a connected undirected graph with `n` vertices, a random
/// spanning tree plus up to `extra_edges` additional distinct edges, and
/// weights uniform in `1..=max_weight`.
///
/// # Panics
/// Panics if `n` is zero or `max_weight` is not positive.
pub fn random_connected_graph<R: Rng>(
    rng: &mut R,
    n: usize,
    extra_edges: usize,
    max_weight: i32,
) -> WeightedGraph {
    assert!(n >= 1, "graphs need at least one vertex");
    assert!(max_weight >= 1, "weights are positive");

    let mut graph = WeightedGraph::new(n).expect("n is positive");

    // random spanning tree: attach every vertex to an earlier one
    for v in 1..n {
        let u = rng.gen_range(0..v);
        let w = rng.gen_range(1..=max_weight);
        graph
            .add_undirected_edge(u, v, w)
            .expect("tree edges are distinct");
    }

    // sprinkle extra edges; attempts hitting an existing pair are skipped
    if n >= 2 {
        for _ in 0..extra_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u == v || graph.has_edge(u, v) {
                continue;
            }
            let w = rng.gen_range(1..=max_weight);
            graph
                .add_undirected_edge(u, v, w)
                .expect("pair was checked");
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union_find::UnionFind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_graphs_are_connected() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1usize, 2, 5, 33, 100] {
            let g = random_connected_graph(&mut rng, n, n, 1000);
            let mut uf = UnionFind::new(n);
            for e in g.edges() {
                uf.union(e.source, e.target);
            }
            let root = uf.find(0);
            for v in 1..n {
                assert_eq!(uf.find(v), root, "n={n} vertex {v}");
            }
        }
    }

    #[test]
    fn weights_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = random_connected_graph(&mut rng, 50, 100, 7);
        for e in g.edges() {
            assert!((1..=7).contains(&e.weight));
        }
    }
}
