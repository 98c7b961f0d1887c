use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thorup_sssp::{
    dijkstra, generator::random_connected_graph, KruskalMsb, MstAlgorithm, Prim, ThorupEngine,
    WeightedGraph,
};

fn engine_for(graph: WeightedGraph, algorithm: &dyn MstAlgorithm) -> ThorupEngine {
    let mut engine = ThorupEngine::new();
    engine.construct_msb_mst(graph, algorithm).unwrap();
    engine.construct_other_data_structures().unwrap();
    engine
}

proptest! {
    #[test]
    fn matches_dijkstra_on_random_graphs(
        seed in 0u64..5_000,
        n in 1usize..60,
        extra in 0usize..120,
        max_weight in 1i32..100_000,
        source_pick in 0usize..60,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = random_connected_graph(&mut rng, n, extra, max_weight);
        let source = source_pick % n;

        let reference = dijkstra::shortest_paths(&graph, source).unwrap();
        let mut engine = engine_for(graph, &KruskalMsb);
        let d = engine.find_shortest_paths(source).unwrap();
        prop_assert_eq!(&d, &reference);
        prop_assert_eq!(d[source], 0);
    }

    #[test]
    fn prim_prepared_engine_matches_dijkstra(
        seed in 0u64..2_000,
        n in 2usize..40,
        extra in 0usize..80,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = random_connected_graph(&mut rng, n, extra, 10_000);
        let reference = dijkstra::shortest_paths(&graph, 0).unwrap();
        let mut engine = engine_for(graph, &Prim);
        prop_assert_eq!(engine.find_shortest_paths(0).unwrap(), reference);
    }

    #[test]
    fn triangle_inequality_over_all_edges(
        seed in 0u64..2_000,
        n in 2usize..50,
        extra in 0usize..100,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = random_connected_graph(&mut rng, n, extra, 50_000);
        let edges: Vec<_> = graph.edges().copied().collect();
        let mut engine = engine_for(graph, &KruskalMsb);
        let d = engine.find_shortest_paths(0).unwrap();
        for e in edges {
            prop_assert!(d[e.target] as i64 <= d[e.source] as i64 + e.weight as i64);
        }
    }

    #[test]
    fn queries_are_repeatable(
        seed in 0u64..1_000,
        n in 1usize..40,
        extra in 0usize..60,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = random_connected_graph(&mut rng, n, extra, 1_000);
        let mut engine = engine_for(graph, &KruskalMsb);
        let first = engine.find_shortest_paths(0).unwrap();
        engine.clean_up_between_queries().unwrap();
        let second = engine.find_shortest_paths(0).unwrap();
        prop_assert_eq!(&first, &second);
        // and from another source on the same prepared state
        let other = (n - 1) / 2;
        let reference = {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = random_connected_graph(&mut rng, n, extra, 1_000);
            dijkstra::shortest_paths(&graph, other).unwrap()
        };
        prop_assert_eq!(engine.find_shortest_paths(other).unwrap(), reference);
    }
}

#[test]
fn small_power_of_two_weights() {
    // weights straddling msb boundaries exercise the component layering
    let mut graph = WeightedGraph::new(6).unwrap();
    let edges = [
        (0, 1, 1),
        (1, 2, 2),
        (2, 3, 4),
        (3, 4, 8),
        (4, 5, 16),
        (0, 5, 31),
        (1, 4, 3),
    ];
    for (u, v, w) in edges {
        graph.add_undirected_edge(u, v, w).unwrap();
    }
    let reference = dijkstra::shortest_paths(&graph, 2).unwrap();
    let mut engine = engine_for(graph, &KruskalMsb);
    assert_eq!(engine.find_shortest_paths(2).unwrap(), reference);
}

#[test]
fn all_equal_weights() {
    // a single msb class collapses the tree to one internal layer
    let mut rng = StdRng::seed_from_u64(3);
    let graph = random_connected_graph(&mut rng, 30, 60, 1);
    let reference = dijkstra::shortest_paths(&graph, 7).unwrap();
    let mut engine = engine_for(graph, &KruskalMsb);
    assert_eq!(engine.find_shortest_paths(7).unwrap(), reference);
}
