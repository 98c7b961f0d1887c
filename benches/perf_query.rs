use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sysinfo::{get_current_pid, ProcessExt, ProcessRefreshKind, System, SystemExt};
use thorup_sssp::{dijkstra, generator::random_connected_graph, KruskalMsb, ThorupEngine};

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = sys.process(get_current_pid().unwrap()) {
        p.memory() // KiB on supported platforms
    } else {
        0
    }
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    for &n in &[1_000usize, 10_000, 50_000] {
        group.bench_function(format!("prepare_n_{n}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    random_connected_graph(&mut rng, n, 3 * n, 1_000_000)
                },
                |graph| {
                    let before = rss_kib();
                    let mut engine = ThorupEngine::new();
                    engine.construct_msb_mst(graph, &KruskalMsb).unwrap();
                    engine.construct_other_data_structures().unwrap();
                    let after = rss_kib();
                    eprintln!(
                        "RSS KiB delta (prepare {n}): {}",
                        after.saturating_sub(before)
                    );
                    criterion::black_box(engine);
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for &n in &[1_000usize, 10_000, 50_000] {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = random_connected_graph(&mut rng, n, 3 * n, 1_000_000);
        let dijkstra_graph = graph.clone();

        let mut engine = ThorupEngine::new();
        engine.construct_msb_mst(graph, &KruskalMsb).unwrap();
        engine.construct_other_data_structures().unwrap();
        // first query pays the bucket initialization; run it outside the
        // measurement
        let warmup = engine.find_shortest_paths(0).unwrap();
        criterion::black_box(warmup);

        group.bench_function(format!("thorup_query_n_{n}"), |b| {
            b.iter(|| {
                let d = engine.find_shortest_paths(0).unwrap();
                criterion::black_box(d);
            })
        });
        group.bench_function(format!("dijkstra_query_n_{n}"), |b| {
            b.iter(|| {
                let d = dijkstra::shortest_paths(&dijkstra_graph, 0).unwrap();
                criterion::black_box(d);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prepare, bench_query);
criterion_main!(benches);
