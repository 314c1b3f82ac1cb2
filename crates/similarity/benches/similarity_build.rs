//! Benchmarks for index fitting and queries
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic corpus shaped like the TMDB catalog (a few thousand items,
//! a few dozen tags each) so no data files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::TagCorpus;
use similarity::{DenseCosineIndex, IndexConfig, SimilarityIndex};

fn synthetic_corpus(items: usize) -> TagCorpus {
    (0..items)
        .map(|i| {
            (0..40)
                .map(|t| format!("tag{}", (i * 7 + t * 13) % 6000))
                .collect::<Vec<String>>()
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let corpus = synthetic_corpus(1000);
    let config = IndexConfig::default();

    c.bench_function("dense_cosine_fit_1000", |b| {
        b.iter(|| {
            let index = DenseCosineIndex::fit(black_box(&corpus), &config).unwrap();
            black_box(index)
        })
    });
}

fn bench_neighbours(c: &mut Criterion) {
    let corpus = synthetic_corpus(4800);
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).expect("Failed to fit index");

    c.bench_function("dense_cosine_neighbours", |b| {
        b.iter(|| {
            let neighbours = index.neighbours(black_box(42), black_box(5));
            black_box(neighbours)
        })
    });
}

criterion_group!(benches, bench_fit, bench_neighbours);
criterion_main!(benches);
