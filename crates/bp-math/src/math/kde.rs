//! Gaussian kernel density estimation over posterior draws.
//!
//! The bandwidth follows Scott's rule, `h = sd * n^(-1/5)` with the
//! unbiased (ddof = 1) standard deviation. The density is evaluated on an
//! evenly spaced grid spanning `[min, max]` of the draws, and the MAP
//! estimate is the grid point with the highest density.
//!
//! Kernels farther than `KERNEL_CUTOFF` bandwidths from a grid point are
//! skipped; their weight is below `exp(-32)` relative to the peak.

use serde::Serialize;

/// Default grid resolution for MAP estimation.
pub const DEFAULT_KDE_POINTS: usize = 10_000;

const KERNEL_CUTOFF: f64 = 8.0;
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7; // 1 / sqrt(2*pi)

/// Density estimate evaluated on a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KdeCurve {
    /// Evenly spaced grid from min to max of the draws (inclusive).
    pub x: Vec<f64>,
    /// Estimated density at each grid point.
    pub density: Vec<f64>,
    /// Kernel bandwidth; 0 for a point mass.
    pub bandwidth: f64,
}

impl KdeCurve {
    /// Whether the draws had no spread and the curve is a point mass.
    pub fn is_degenerate(&self) -> bool {
        self.bandwidth == 0.0
    }

    /// Grid value with the highest density (first one on ties).
    pub fn mode(&self) -> Option<f64> {
        let idx = argmax(&self.density)?;
        self.x.get(idx).copied()
    }

    /// Largest density value on the grid.
    pub fn max_density(&self) -> Option<f64> {
        argmax(&self.density).map(|i| self.density[i])
    }

    /// Density at the grid point nearest to `x`.
    pub fn density_near(&self, x: f64) -> Option<f64> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &g) in self.x.iter().enumerate() {
            let dist = (g - x).abs();
            match best {
                Some((_, d)) if d <= dist => {}
                _ => best = Some((i, dist)),
            }
        }
        best.map(|(i, _)| self.density[i])
    }
}

/// `num` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            out[num - 1] = end;
            out
        }
    }
}

/// Unbiased sample standard deviation. NaN for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1.0)).sqrt()
}

/// Scott's rule bandwidth. NaN for fewer than two values.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    let sd = sample_std(values);
    if sd.is_nan() {
        return f64::NAN;
    }
    sd * (values.len() as f64).powf(-0.2)
}

/// Fit a Gaussian KDE to `draws` and evaluate it on `num` grid points.
///
/// Returns None for empty or non-finite input, or `num == 0`. Draws with
/// no spread (including a single draw) produce a degenerate curve: every
/// grid point sits at the constant value with infinite density.
pub fn gaussian_kde(draws: &[f64], num: usize) -> Option<KdeCurve> {
    if draws.is_empty() || num == 0 || draws.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let mut sorted = draws.to_vec();
    sorted.sort_by(f64::total_cmp);
    let lo = sorted[0];
    let hi = sorted[sorted.len() - 1];
    let x = linspace(lo, hi, num);

    let h = scott_bandwidth(&sorted);
    if lo == hi || !(h > 0.0) || !h.is_finite() {
        return Some(KdeCurve {
            x,
            density: vec![f64::INFINITY; num],
            bandwidth: 0.0,
        });
    }

    let norm = INV_SQRT_2PI / (sorted.len() as f64 * h);
    let reach = KERNEL_CUTOFF * h;
    let mut start = 0;
    let density = x
        .iter()
        .map(|&g| {
            while start < sorted.len() && sorted[start] < g - reach {
                start += 1;
            }
            let mut sum = 0.0;
            for &v in &sorted[start..] {
                if v > g + reach {
                    break;
                }
                let z = (g - v) / h;
                sum += (-0.5 * z * z).exp();
            }
            sum * norm
        })
        .collect();

    Some(KdeCurve {
        x,
        density,
        bandwidth: h,
    })
}

/// MAP estimate: the KDE grid point with the highest density.
pub fn kde_map(draws: &[f64], num: usize) -> Option<f64> {
    gaussian_kde(draws, num)?.mode()
}

fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if values[b] >= v => {}
            _ => best = Some(i),
        }
    }
    best
}
