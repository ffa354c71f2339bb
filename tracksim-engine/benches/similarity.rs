//! Criterion benchmarks for the scorer and the all-pairs build.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tracksim_core::traits::MemorySimilaritySink;
use tracksim_core::types::Rating;
use tracksim_engine::{pearson, MatrixOptions, RatingIndex, RatingRow, SimilarityMatrixBuilder};

/// Deterministic synthetic log: every user rates a strided subset of items.
fn synthetic_log(users: i64, items: i64) -> Vec<Rating> {
    let mut log = Vec::new();
    for user in 0..users {
        for item in (user % 3..items).step_by(3) {
            let rating = ((user * 7 + item * 13) % 5 + 1) as i32;
            log.push(Rating::new(user, item, rating));
        }
    }
    log
}

fn bench_pearson(c: &mut Criterion) {
    let a = RatingRow::from_pairs((0..1_000).map(|p| (p * 2, (p % 5 + 1) as i32)));
    let b = RatingRow::from_pairs((0..1_000).map(|p| (p * 3, ((p * 3) % 5 + 1) as i32)));
    c.bench_function("pearson_1k_sparse", |bench| {
        bench.iter(|| pearson(black_box(a.as_vector()), black_box(b.as_vector())))
    });
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_matrix");
    group.sample_size(10);
    let index = RatingIndex::by_item(&synthetic_log(300, 150));
    for parallel in [false, true] {
        let options = MatrixOptions {
            parallel,
            window: 32,
            ..MatrixOptions::default()
        };
        group.bench_with_input(
            BenchmarkId::new("items_150", if parallel { "parallel" } else { "sequential" }),
            &options,
            |bench, options| {
                bench.iter(|| {
                    let mut sink = MemorySimilaritySink::new();
                    SimilarityMatrixBuilder::new(&index, *options)
                        .build(&mut sink)
                        .map(|stats| stats.entries)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pearson, bench_matrix);
criterion_main!(benches);
