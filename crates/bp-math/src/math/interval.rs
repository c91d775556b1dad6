//! Point and interval summaries over posterior draws.
//!
//! Quantiles use linear interpolation between order statistics (the R-7
//! method, which is also numpy's default). The highest-density interval
//! scans the sorted draws for the narrowest window that holds the requested
//! share of them.

use serde::{Deserialize, Serialize};

/// Closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    /// Whether `x` lies strictly inside the interval.
    pub fn contains_open(&self, x: f64) -> bool {
        x > self.lower && x < self.upper
    }
}

/// Arithmetic mean. NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sorted copy of `values` (total order, NaN last).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q` of already-sorted values.
///
/// Returns NaN for empty input or `q` outside [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() || q.is_nan() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);
    if frac == 0.0 {
        return a;
    }
    a + (b - a) * frac
}

/// Quantiles of unsorted values; sorts once for all requested levels.
pub fn quantiles(values: &[f64], levels: &[f64]) -> Vec<f64> {
    let sorted = sorted(values);
    levels.iter().map(|&q| quantile_sorted(&sorted, q)).collect()
}

/// Highest-density interval of already-sorted values.
///
/// The window spans `floor(prob * n) + 1` order statistics; ties resolve
/// to the leftmost narrowest window. Returns None for empty input or `prob`
/// outside the open interval (0, 1).
pub fn hdi_sorted(sorted: &[f64], prob: f64) -> Option<Interval> {
    if sorted.is_empty() || prob.is_nan() || prob <= 0.0 || prob >= 1.0 {
        return None;
    }
    let n = sorted.len();
    let span = (prob * n as f64).floor() as usize;
    let candidates = n - span;

    let mut best = 0;
    let mut best_width = f64::INFINITY;
    for start in 0..candidates {
        let width = sorted[start + span] - sorted[start];
        if width < best_width {
            best_width = width;
            best = start;
        }
    }

    Some(Interval {
        lower: sorted[best],
        upper: sorted[best + span],
    })
}

/// Highest-density interval of unsorted values.
pub fn hdi(values: &[f64], prob: f64) -> Option<Interval> {
    hdi_sorted(&sorted(values), prob)
}
