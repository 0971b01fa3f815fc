use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lattice::prelude::*;

fn enumerate_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    for dims in [vec![6], vec![3, 3], vec![4, 3], vec![2, 2, 2]] {
        let graph = HrpGraph::new(&dims).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", dims)),
            &graph,
            |b, graph| b.iter(|| induced_subtrees(graph).count()),
        );
    }

    group.finish();
}

fn random_playouts(c: &mut Criterion) {
    let graph = HrpGraph::new(&[3, 3, 3]).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let pool = WorkerPool::with_threads(1).unwrap();
    c.bench_function("nmc_level_0", |b| {
        b.iter(|| {
            let ctx = SearchContext::new(dir.path().join("best"), pool.size());
            nmc_largest(&graph, NmcConfig::new(0), &pool, &ctx)
        })
    });
}

criterion_group!(benches, enumerate_grids, random_playouts);
criterion_main!(benches);
