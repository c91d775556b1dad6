//! Density-normalized histograms of posterior draws.
//!
//! Bin width follows Scott's rule (`3.5 * sd * n^(-1/3)`); samples without
//! spread collapse into a single bin.

use serde::Serialize;

use super::kde::sample_std;

/// Histogram with bin edges and probability-density heights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges (length = bins + 1).
    pub edges: Vec<f64>,
    /// Raw counts per bin.
    pub counts: Vec<usize>,
    /// `count / (n * width)` per bin; integrates to 1.
    pub density: Vec<f64>,
}

impl Histogram {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }
}

/// Number of bins suggested by Scott's rule, clamped to `[1, n]`.
pub fn scott_bins(values: &[f64]) -> usize {
    let sd = sample_std(values);
    let (lo, hi) = min_max(values);
    let range = hi - lo;
    if !(sd > 0.0) || !(range > 0.0) {
        return 1;
    }
    let width = 3.5 * sd * (values.len() as f64).powf(-1.0 / 3.0);
    let bins = (range / width).ceil();
    if !bins.is_finite() {
        return values.len();
    }
    (bins as usize).clamp(1, values.len())
}

/// Histogram of `values` with `bins` equal-width bins spanning their range.
///
/// Returns None for empty or non-finite input, or zero bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let (lo, hi) = min_max(values);
    let n = values.len() as f64;

    if lo == hi {
        return Some(Histogram {
            edges: vec![lo, hi],
            counts: vec![values.len()],
            density: vec![f64::INFINITY],
        });
    }

    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    edges[bins] = hi;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let density = counts.iter().map(|&c| c as f64 / (n * width)).collect();

    Some(Histogram {
        edges,
        counts,
        density,
    })
}

/// Histogram with the bin count chosen by Scott's rule.
pub fn scott_histogram(values: &[f64]) -> Option<Histogram> {
    histogram(values, scott_bins(values))
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
