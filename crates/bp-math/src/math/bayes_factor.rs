//! Bayes factors from posterior draws and their Jeffreys-scale reading.
//!
//! For a directional hypothesis H1 about the delta posterior (e.g. "delta is
//! greater than 0") the posterior mass of H1 is the share of draws that
//! satisfy it, and the complementary hypothesis H2 takes the rest:
//!
//! `BF = P(H1 | data) / P(H2 | data) = p_h1 / (1 - p_h1)`
//!
//! When every draw satisfies H1 the denominator is zero and the factor is
//! reported as `+inf`.
//!
//! # Jeffreys scale
//!
//! | Bayes factor          | Strength                  |
//! |-----------------------|---------------------------|
//! | `< 1`                 | negative                  |
//! | `[1, 10^0.5]`         | barely worth mentioning   |
//! | `(10^0.5, 10]`        | substantial               |
//! | `(10, 10^1.5]`        | strong                    |
//! | `(10^1.5, 100]`       | very strong               |
//! | `> 100` or infinite   | decisive                  |

use serde::Serialize;

/// 10^0.5
pub const SQRT_10: f64 = 3.162_277_660_168_379_5;
/// 10^1.5
pub const TEN_POW_1_5: f64 = 31.622_776_601_683_793;

/// Evidence strength on the Jeffreys scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// BF < 1: the data favor the complementary hypothesis.
    Negative,
    /// 1 <= BF <= 10^0.5
    BarelyWorthMentioning,
    /// 10^0.5 < BF <= 10
    Substantial,
    /// 10 < BF <= 10^1.5
    Strong,
    /// 10^1.5 < BF <= 100
    VeryStrong,
    /// BF > 100, including +inf
    Decisive,
}

/// Inclusive upper bounds for every level from 1 upwards. Anything above the
/// last bound is decisive.
pub const JEFFREYS_SCALE: [(f64, EvidenceStrength); 4] = [
    (SQRT_10, EvidenceStrength::BarelyWorthMentioning),
    (10.0, EvidenceStrength::Substantial),
    (TEN_POW_1_5, EvidenceStrength::Strong),
    (100.0, EvidenceStrength::VeryStrong),
];

impl EvidenceStrength {
    /// Classify a Bayes factor. NaN and values below 1 read as negative.
    pub fn from_bayes_factor(bf: f64) -> Self {
        if bf.is_nan() || bf < 1.0 {
            return EvidenceStrength::Negative;
        }
        JEFFREYS_SCALE
            .iter()
            .find(|(upper, _)| bf <= *upper)
            .map(|(_, strength)| *strength)
            .unwrap_or(EvidenceStrength::Decisive)
    }

    /// Return the display label.
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceStrength::Negative => "negative",
            EvidenceStrength::BarelyWorthMentioning => "barely worth mentioning",
            EvidenceStrength::Substantial => "substantial",
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::VeryStrong => "very strong",
            EvidenceStrength::Decisive => "decisive",
        }
    }
}

impl std::fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Posterior odds of H1 against its complement given `p_h1 = P(H1 | data)`.
///
/// Returns `+inf` when `p_h1 == 1` and NaN for `p_h1` outside [0, 1].
pub fn bayes_factor_from_proportion(p_h1: f64) -> f64 {
    if p_h1.is_nan() || !(0.0..=1.0).contains(&p_h1) {
        return f64::NAN;
    }
    let p_h2 = 1.0 - p_h1;
    if p_h2 == 0.0 {
        return f64::INFINITY;
    }
    p_h1 / p_h2
}
