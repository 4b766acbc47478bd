//! Build and query benchmarks for the small-world graph index.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use entorno::{Euclidean, SwgIndex, SwgParams};

fn random_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let data = random_vectors(2000, 8, 7);
    let params = SwgParams {
        nn: 8,
        index_threads: 1,
        seed: Some(7),
        ..SwgParams::default()
    };

    c.bench_function("swg_build_2k_d8", |b| {
        b.iter(|| {
            let index =
                SwgIndex::build(Euclidean, black_box(data.clone()), &params).expect("build");
            black_box(index.len())
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let data = random_vectors(5000, 8, 13);
    let queries = random_vectors(64, 8, 14);
    let params = SwgParams {
        nn: 8,
        seed: Some(13),
        ..SwgParams::default()
    };
    let index = SwgIndex::build(Euclidean, data, &params).expect("build");

    c.bench_function("swg_query_5k_d8_k10", |b| {
        let mut cursor = 0;
        b.iter(|| {
            let query = &queries[cursor % queries.len()];
            cursor += 1;
            black_box(index.search(black_box(query), 10).expect("search"))
        })
    });
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
