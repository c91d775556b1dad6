//! Directional inference on the delta posterior.
//!
//! Two procedures:
//! - probability of superiority: share of delta draws above (or below) zero,
//!   read on a five-level verbal scale
//! - Bayes factor: posterior odds of "delta is above (or below) `value`"
//!   against its complement, read on the Jeffreys scale
//!
//! The probability statistic is always measured against zero. The
//! comparison `value` only appears in the rendered sentence; the Bayes
//! factor does use it.

use std::str::FromStr;

use bp_math::bayes_factor::{bayes_factor_from_proportion, EvidenceStrength};
use bp_math::verbal::VerbalProbability;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::summary::resolve_names;

/// Side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    GreaterThan,
    LessThan,
}

impl Direction {
    /// Whether `x` lies on this side of `value` (strict).
    pub fn holds(self, x: f64, value: f64) -> bool {
        match self {
            Direction::GreaterThan => x > value,
            Direction::LessThan => x < value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::GreaterThan => "greater than",
            Direction::LessThan => "less than",
        }
    }

    /// Wording of the complementary hypothesis.
    pub fn complement(self) -> &'static str {
        match self {
            Direction::GreaterThan => "less than or equal to",
            Direction::LessThan => "greater than or equal to",
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "greater than" | "greater_than" => Ok(Direction::GreaterThan),
            "less than" | "less_than" => Ok(Direction::LessThan),
            _ => Err(ValidationError::InvalidDirection),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options shared by both inference procedures.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceQuery {
    pub direction: Direction,
    pub value: f64,
    /// Render a sentence describing the result.
    pub render: bool,
    pub names: Option<Vec<String>>,
}

impl Default for InferenceQuery {
    fn default() -> Self {
        Self {
            direction: Direction::GreaterThan,
            value: 0.0,
            render: true,
            names: None,
        }
    }
}

impl InferenceQuery {
    /// Query with a textual direction ("greater than" / "less than").
    pub fn parse(direction: &str, value: f64) -> Result<Self> {
        Ok(Self {
            direction: direction.parse()?,
            value,
            ..Self::default()
        })
    }

    pub fn quiet(mut self) -> Self {
        self.render = false;
        self
    }
}

/// Probability that delta lies on the queried side of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityInference {
    pub probability: f64,
    pub verdict: VerbalProbability,
    pub direction: Direction,
    pub value: f64,
    pub message: Option<String>,
}

impl ProbabilityInference {
    pub fn label(&self) -> &'static str {
        self.verdict.label()
    }
}

/// Bayes factor for delta lying on the queried side of `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BayesFactorInference {
    /// `p_h1 / p_h2`; `+inf` when every draw satisfies H1.
    pub bayes_factor: f64,
    pub strength: EvidenceStrength,
    pub p_h1: f64,
    pub p_h2: f64,
    pub direction: Direction,
    pub value: f64,
    pub message: Option<String>,
}

impl BayesFactorInference {
    pub fn label(&self) -> &'static str {
        self.strength.label()
    }
}

/// Share of `draws` on the `direction` side of `value`.
pub fn proportion(draws: &[f64], direction: Direction, value: f64) -> f64 {
    if draws.is_empty() {
        return f64::NAN;
    }
    let hits = draws.iter().filter(|&&d| direction.holds(d, value)).count();
    hits as f64 / draws.len() as f64
}

/// Probability of superiority for the delta draws.
pub fn infer_probability(delta: &[f64], query: &InferenceQuery) -> Result<ProbabilityInference> {
    let names = resolve_names(query.names.as_deref())?;
    let probability = proportion(delta, query.direction, 0.0);
    let verdict = VerbalProbability::from_probability(probability)
        .ok_or(ValidationError::ProbabilityOutOfRange)?;

    debug!(
        direction = %query.direction,
        probability,
        verdict = verdict.label(),
        "delta probability inferred"
    );

    let message = query.render.then(|| {
        probability_message(probability, verdict, query.direction, query.value, &names[2])
    });
    Ok(ProbabilityInference {
        probability,
        verdict,
        direction: query.direction,
        value: query.value,
        message,
    })
}

/// Bayes factor for the delta draws.
pub fn infer_bayes_factor(delta: &[f64], query: &InferenceQuery) -> Result<BayesFactorInference> {
    let names = resolve_names(query.names.as_deref())?;
    let p_h1 = proportion(delta, query.direction, query.value);
    if p_h1.is_nan() {
        return Err(ValidationError::ProbabilityOutOfRange);
    }
    let p_h2 = 1.0 - p_h1;
    let bayes_factor = bayes_factor_from_proportion(p_h1);
    let strength = EvidenceStrength::from_bayes_factor(bayes_factor);

    debug!(
        direction = %query.direction,
        value = query.value,
        p_h1,
        bayes_factor,
        strength = strength.label(),
        "delta bayes factor inferred"
    );

    let message = query.render.then(|| {
        bayes_factor_message(bayes_factor, strength, query.direction, query.value, &names[2])
    });
    Ok(BayesFactorInference {
        bayes_factor,
        strength,
        p_h1,
        p_h2,
        direction: query.direction,
        value: query.value,
        message,
    })
}

/// Sentence describing a probability-of-superiority result.
pub fn probability_message(
    probability: f64,
    verdict: VerbalProbability,
    direction: Direction,
    value: f64,
    parameter: &str,
) -> String {
    format!(
        "the probability that {parameter} is {direction} {value} is {:.2}%, \
         interpreted as '{verdict}'",
        probability * 100.0
    )
}

/// Sentence describing a Bayes factor result.
pub fn bayes_factor_message(
    bayes_factor: f64,
    strength: EvidenceStrength,
    direction: Direction,
    value: f64,
    parameter: &str,
) -> String {
    format!(
        "the Bayes factor for {parameter} {direction} {value} against {parameter} {} {value} \
         is {}, interpreted as '{strength}' evidence",
        direction.complement(),
        format_bayes_factor(bayes_factor),
    )
}

fn format_bayes_factor(bf: f64) -> String {
    if bf.is_infinite() {
        "infinite".to_string()
    } else {
        format!("{bf:.3}")
    }
}
