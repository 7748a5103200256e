//! Benchmarks for scoring, recommendations and full analyses.
//!
//! Run with: cargo bench --bench scoring_benchmark

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gbp_score::analysis::{simulate, Analyzer, SimulatedProvider};
use gbp_score::places::MockPlaces;
use gbp_score::scoring::{CompositeScorer, MetricsBundle, RecommendationEngine};
use rand::{rngs::StdRng, SeedableRng};

/// Generate `count` simulated metric bundles.
fn generate_bundles(count: usize) -> Vec<MetricsBundle> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count).map(|_| simulate(&mut rng, None).metrics).collect()
}

fn bench_overall_score(c: &mut Criterion) {
    let scorer = CompositeScorer::new();
    let bundles = generate_bundles(1000);

    c.bench_function("overall_score_1000_bundles", |b| {
        b.iter(|| {
            for m in &bundles {
                black_box(scorer.overall_score(black_box(m)));
            }
        })
    });
}

fn bench_recommendations(c: &mut Criterion) {
    let engine = RecommendationEngine::default();
    let mut group = c.benchmark_group("recommendations");

    for size in [10, 100, 1000] {
        let bundles = generate_bundles(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bundles, |b, bundles| {
            b.iter(|| {
                for m in bundles {
                    black_box(engine.action_items(black_box(m)));
                }
            })
        });
    }
    group.finish();
}

fn bench_analyse_mock(c: &mut Criterion) {
    let provider = SimulatedProvider::new(Arc::new(MockPlaces::new())).with_seed(Some(7));
    let analyzer = Analyzer::new(Arc::new(provider));

    c.bench_function("analyse_mock_business", |b| {
        b.iter(|| {
            let _ = black_box(analyzer.analyse(black_box("Green Leaf")));
        })
    });
}

criterion_group!(
    benches,
    bench_overall_score,
    bench_recommendations,
    bench_analyse_mock
);
criterion_main!(benches);
