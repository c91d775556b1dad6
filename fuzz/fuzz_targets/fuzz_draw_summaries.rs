//! Fuzz target for quantiles, HDI, KDE and histograms over arbitrary draws.

#![no_main]

use arbitrary::Arbitrary;
use bp_math::{gaussian_kde, hdi, quantiles, scott_histogram};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    draws: Vec<f64>,
    levels: Vec<f64>,
    prob: f64,
    points: u8,
}

fuzz_target!(|input: Input| {
    let draws: Vec<f64> = input.draws.into_iter().take(4096).collect();
    let _ = quantiles(&draws, &input.levels);
    if let Some(interval) = hdi(&draws, input.prob) {
        assert!(interval.lower <= interval.upper || interval.lower.is_nan() || interval.upper.is_nan());
    }
    if let Some(curve) = gaussian_kde(&draws, usize::from(input.points)) {
        assert_eq!(curve.x.len(), curve.density.len());
        assert!(curve.density.iter().all(|d| !(*d < 0.0)));
    }
    if let Some(hist) = scott_histogram(&draws) {
        assert_eq!(hist.counts.iter().sum::<usize>(), draws.len());
    }
});
