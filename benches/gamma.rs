mod common;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use common::{complex_arguments, real_arguments};
use rational_gamma::{native, GammaEngine, GammaFunction, Rational};

const SAMPLE_COUNT: usize = 16;
const PRECISIONS: [i64; 4] = [32, 64, 128, 256];

fn bench_real(c: &mut Criterion) {
    let inputs = real_arguments(SAMPLE_COUNT);
    // Cache fills are measured in the bernoulli bench.
    let engine = GammaEngine::default();
    engine.bernoulli_number(512);

    let mut group = c.benchmark_group("gamma_real");
    for px in PRECISIONS {
        group.bench_with_input(BenchmarkId::new("tgamma", px), &px, |b, &px| {
            b.iter(|| {
                for z in &inputs {
                    black_box(engine.gamma(z, px));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("lgamma", px), &px, |b, &px| {
            b.iter(|| {
                for z in &inputs {
                    black_box(engine.ln_gamma(z, px));
                }
            })
        });
    }
    group.finish();
}

fn bench_complex(c: &mut Criterion) {
    let inputs = complex_arguments(SAMPLE_COUNT);
    let engine = GammaEngine::default();
    engine.bernoulli_number(512);

    let mut group = c.benchmark_group("gamma_complex");
    for px in [32i64, 64, 128] {
        group.bench_with_input(BenchmarkId::new("tgamma", px), &px, |b, &px| {
            b.iter(|| {
                for z in &inputs {
                    black_box(engine.gamma(z, px));
                }
            })
        });
    }
    group.finish();
}

fn bench_float(c: &mut Criterion) {
    let inputs: Vec<f64> = real_arguments(SAMPLE_COUNT)
        .iter()
        .map(Rational::to_f64)
        .collect();
    let engine = GammaEngine::default();

    let mut group = c.benchmark_group("gamma_f64");
    group.bench_function("libm", |b| {
        b.iter(|| {
            for &x in &inputs {
                black_box(native::tgamma(x));
            }
        })
    });
    group.bench_function("engine", |b| {
        b.iter(|| {
            for x in &inputs {
                black_box(x.gamma(&engine, 0));
            }
        })
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_real, bench_complex, bench_float
}
criterion_main!(benches);
