//! Beta posteriors for a binomial success probability.
//!
//! The model is the single conjugate update:
//! - Prior: `p ~ Beta(α, β)`
//! - Likelihood: `k | p ~ Binomial(n, p)`
//! - Posterior: `p | k,n ~ Beta(α + k, β + n - k)`
//!
//! Draws are taken with `rand_distr::Beta` from a caller-owned generator so
//! that seeding stays under the caller's control.

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

/// Shape parameters of a Beta distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    /// Create Beta parameters, returning None unless both shapes are finite and > 0.
    pub fn new(alpha: f64, beta: f64) -> Option<Self> {
        if !alpha.is_finite() || !beta.is_finite() || alpha <= 0.0 || beta <= 0.0 {
            return None;
        }
        Some(Self { alpha, beta })
    }

    /// Jeffreys prior Beta(0.5, 0.5).
    pub const fn jeffreys() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.5,
        }
    }

    /// Whether both shapes are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        Self::new(self.alpha, self.beta).is_some()
    }

    /// Conjugate update after observing `successes` out of `trials`.
    ///
    /// Returns None for negative counts, successes above trials, or an
    /// invalid prior.
    pub fn posterior(&self, successes: f64, trials: f64) -> Option<Self> {
        if successes.is_nan() || trials.is_nan() {
            return None;
        }
        if successes < 0.0 || successes > trials {
            return None;
        }
        if !self.is_valid() {
            return None;
        }
        Self::new(self.alpha + successes, self.beta + (trials - successes))
    }

    /// Mean α / (α + β).
    pub fn mean(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        self.alpha / (self.alpha + self.beta)
    }

    /// Variance αβ / ((α+β)²(α+β+1)).
    pub fn variance(&self) -> f64 {
        if !self.is_valid() {
            return f64::NAN;
        }
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Mode (α-1)/(α+β-2), defined only when both shapes exceed 1.
    pub fn mode(&self) -> Option<f64> {
        if !self.is_valid() || self.alpha <= 1.0 || self.beta <= 1.0 {
            return None;
        }
        Some((self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
    }

    /// Draw `n` independent samples using `rng`.
    ///
    /// Returns None when the parameters cannot define a Beta distribution.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Option<Vec<f64>> {
        if !self.is_valid() {
            return None;
        }
        let dist = Beta::new(self.alpha, self.beta).ok()?;
        Some((0..n).map(|_| dist.sample(rng)).collect())
    }
}

impl Default for BetaParams {
    fn default() -> Self {
        Self::jeffreys()
    }
}
