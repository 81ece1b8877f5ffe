use criterion::{Criterion, black_box, criterion_group, criterion_main};
use molnet_core::metrics::{Metric, mae, r2_score, rmse, roc_auc};
use molnet_core::{MOLNET_DATASETS, SourceConfig, get_descriptor, molnet_catalog};
use ndarray::Array2;

/// 1000 molecules by 12 tasks with every seventh target missing.
fn tox21_sized() -> (Array2<f64>, Array2<f64>) {
    let predictions = Array2::from_shape_fn((1000, 12), |(r, c)| {
        ((r * 31 + c * 17) % 97) as f64 / 48.5 - 1.0
    });
    let targets = Array2::from_shape_fn((1000, 12), |(r, c)| {
        if (r + c) % 7 == 0 {
            f64::NAN
        } else {
            ((r * 13 + c) % 2) as f64
        }
    });
    (predictions, targets)
}

fn bench_regression_metrics(c: &mut Criterion) {
    let (p, t) = tox21_sized();

    c.bench_function("mae_1000x12", |b| {
        b.iter(|| mae(black_box(p.view()), black_box(t.view())))
    });

    c.bench_function("rmse_1000x12", |b| {
        b.iter(|| rmse(black_box(p.view()), black_box(t.view())))
    });

    c.bench_function("r2_score_1000x12", |b| {
        b.iter(|| r2_score(black_box(p.view()), black_box(t.view())))
    });
}

fn bench_classification_metrics(c: &mut Criterion) {
    let (p, t) = tox21_sized();

    c.bench_function("roc_auc_1000x12", |b| {
        b.iter(|| roc_auc(black_box(p.view()), black_box(t.view())))
    });

    c.bench_function("binary_accuracy_1000x12", |b| {
        b.iter(|| Metric::BinaryAccuracy.evaluate(black_box(p.view()), black_box(t.view())))
    });
}

fn bench_registry(c: &mut Criterion) {
    c.bench_function("build_molnet_catalog", |b| {
        let sources = SourceConfig::default();
        b.iter(|| molnet_catalog(black_box(&sources)))
    });

    c.bench_function("lookup_every_dataset", |b| {
        b.iter(|| {
            for name in MOLNET_DATASETS {
                let _ = get_descriptor(black_box(name));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_regression_metrics,
    bench_classification_metrics,
    bench_registry
);
criterion_main!(benches);
