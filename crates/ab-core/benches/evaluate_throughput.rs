use ab_config::ConversionPrior;
use ab_core::model::AnalyticMethod;
use ab_core::{BayesianEngine, VariantId, VariantObservation};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn observations(method: AnalyticMethod, n: usize) -> Vec<VariantObservation> {
    (0..n)
        .map(|i| {
            let label = VariantId::nth(i);
            match method {
                AnalyticMethod::Conversion => {
                    VariantObservation::conversion(label, 10_000, 1_000 + 10 * i as u64)
                }
                _ => VariantObservation::numeric(label, 10_000, 1_000, 25_000.0 + 100.0 * i as f64),
            }
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let engine = BayesianEngine::default();
    for method in AnalyticMethod::ALL {
        for variants in [2usize, 5] {
            let obs = observations(method, variants);
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), variants),
                &obs,
                |b, obs| {
                    b.iter(|| {
                        engine
                            .evaluate(black_box(obs), ConversionPrior::default(), method)
                            .unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
