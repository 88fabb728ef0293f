use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use estimator_checks::checks::{check_estimator, ConformanceConfig, ConformanceSuite};
use estimator_checks::registry;

fn bench_full_suite(c: &mut Criterion) {
    let registry = registry::builtin().unwrap();
    let config = ConformanceConfig::default();
    c.bench_function("full_suite", |b| {
        b.iter(|| {
            let report = ConformanceSuite::new(black_box(&registry), config.clone()).run();
            black_box(report);
        });
    });
}

fn bench_per_estimator(c: &mut Criterion) {
    let registry = registry::builtin().unwrap();
    let config = ConformanceConfig::default();
    for ty in registry.all_estimators(&Default::default()) {
        c.bench_with_input(BenchmarkId::new("check_estimator", ty.name), &ty, |b, ty| {
            b.iter(|| black_box(check_estimator(ty, &config)));
        });
    }
}

criterion_group!(benches, bench_full_suite, bench_per_estimator);
criterion_main!(benches);
