//! Criterion benchmarks for `bp-math`.
//!
//! Focus on the kernels a summary call runs per parameter.

use bp_math::{gaussian_kde, hdi_sorted, sorted, BetaParams};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn posterior_draws(n: usize) -> Vec<f64> {
    let post = BetaParams::new(10.5, 40.5).expect("valid shapes");
    let mut rng = StdRng::seed_from_u64(1000);
    post.sample(n, &mut rng).expect("valid shapes")
}

fn bench_summary_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for n in [1_000usize, 10_000] {
        let draws = posterior_draws(n);
        let ordered = sorted(&draws);

        group.bench_with_input(BenchmarkId::new("hdi_sorted", n), &ordered, |b, s| {
            b.iter(|| black_box(hdi_sorted(black_box(s), 0.95)));
        });

        for num in [100usize, 10_000] {
            group.bench_with_input(
                BenchmarkId::new(format!("gaussian_kde_{num}"), n),
                &draws,
                |b, d| {
                    b.iter(|| black_box(gaussian_kde(black_box(d), num)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_summary_kernels);
criterion_main!(benches);
