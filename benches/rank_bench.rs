//! Criterion benchmarks for exhaustive ranking over the built-in catalog.

use cn_resource_optimizer::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

fn random_weights() -> WeightVector {
    let mut rng = rand::rng();
    Effect::ALL
        .iter()
        .fold(WeightVector::new(), |w, &e| w.with(e, rng.random_range(0.0..5.0)))
}

// ===========================================================================
// Single evaluation
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let evaluator = Evaluator::cybernations();
    let names: Vec<&str> = evaluator.catalog().names().take(12).collect();
    let subset = evaluator.subset(&names).expect("built-in names");
    let weights = random_weights();

    c.bench_function("evaluate_k12", |b| {
        b.iter(|| evaluator.evaluate(black_box(&subset), black_box(&weights)))
    });
}

// ===========================================================================
// Full rankings
// ===========================================================================

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    group.sample_size(10);

    let evaluator = Evaluator::cybernations();
    let weights = WeightVector::dashboard();

    for &(k, parallel) in &[(4, false), (4, true), (6, false), (6, true)] {
        let config = RankConfig::default()
            .with_subset_size(k)
            .with_parallel(parallel);
        let label = if parallel { "par" } else { "seq" };
        group.bench_with_input(BenchmarkId::new(label, k), &config, |b, cfg| {
            b.iter(|| Ranker::rank(&evaluator, black_box(&weights), cfg))
        });
    }

    group.finish();
}

fn bench_rank_required_member(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_required_member");
    group.sample_size(10);

    let evaluator = Evaluator::cybernations();
    let weights = random_weights();

    for k in [6, 8] {
        let config = RankConfig::default()
            .with_subset_size(k)
            .with_required_member("Uranium");
        group.bench_with_input(BenchmarkId::from_parameter(k), &config, |b, cfg| {
            b.iter(|| Ranker::rank(&evaluator, black_box(&weights), cfg))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_rank, bench_rank_required_member);
criterion_main!(benches);
