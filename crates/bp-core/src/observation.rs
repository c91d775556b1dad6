//! Observed counts per group and the shared Beta prior.
//!
//! Inputs arrive as anything that holds exactly two numbers
//! (`[successes, trials]`): arrays, tuples, slices, vectors, or an already
//! validated [`GroupObservation`]. The [`CountPair`] trait is the only
//! structural requirement.

use bp_math::BetaParams;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// An indexable pair of two numbers: `[successes, trials]`.
pub trait CountPair {
    /// Both values, or None when the input does not hold exactly two.
    fn values(&self) -> Option<[f64; 2]>;
}

impl<T: Copy + Into<f64>> CountPair for [T; 2] {
    fn values(&self) -> Option<[f64; 2]> {
        Some([self[0].into(), self[1].into()])
    }
}

impl<T: Copy + Into<f64>> CountPair for (T, T) {
    fn values(&self) -> Option<[f64; 2]> {
        Some([self.0.into(), self.1.into()])
    }
}

impl<T: Copy + Into<f64>> CountPair for [T] {
    fn values(&self) -> Option<[f64; 2]> {
        match self {
            [s, t] => Some([(*s).into(), (*t).into()]),
            _ => None,
        }
    }
}

impl<T: Copy + Into<f64>> CountPair for Vec<T> {
    fn values(&self) -> Option<[f64; 2]> {
        self.as_slice().values()
    }
}

impl<C: CountPair + ?Sized> CountPair for &C {
    fn values(&self) -> Option<[f64; 2]> {
        (**self).values()
    }
}

impl CountPair for GroupObservation {
    fn values(&self) -> Option<[f64; 2]> {
        Some([self.successes, self.trials])
    }
}

/// Successes out of trials for one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupObservation {
    successes: f64,
    trials: f64,
}

impl GroupObservation {
    /// Validate a single group's counts.
    pub fn new(successes: f64, trials: f64) -> Result<Self> {
        let [s, t] = check_shape(&[successes, trials])?;
        if s > t {
            return Err(ValidationError::SuccessesExceedTrials);
        }
        Ok(Self {
            successes: s,
            trials: t,
        })
    }

    pub fn successes(&self) -> f64 {
        self.successes
    }

    pub fn trials(&self) -> f64 {
        self.trials
    }
}

/// Validate both groups, shape checks first, then successes against trials.
pub fn validate_pair<A, B>(a: &A, b: &B) -> Result<(GroupObservation, GroupObservation)>
where
    A: CountPair + ?Sized,
    B: CountPair + ?Sized,
{
    let [sa, ta] = check_shape(a)?;
    let [sb, tb] = check_shape(b)?;
    if sa > ta || sb > tb {
        return Err(ValidationError::SuccessesExceedTrials);
    }
    Ok((
        GroupObservation {
            successes: sa,
            trials: ta,
        },
        GroupObservation {
            successes: sb,
            trials: tb,
        },
    ))
}

fn check_shape<C: CountPair + ?Sized>(input: &C) -> Result<[f64; 2]> {
    let [s, t] = input.values().ok_or(ValidationError::MalformedObservation)?;
    if !s.is_finite() || !t.is_finite() || s < 0.0 || t <= 0.0 {
        return Err(ValidationError::MalformedObservation);
    }
    Ok([s, t])
}

/// Beta prior shared by both groups. Defaults to Jeffreys (0.5, 0.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prior {
    pub alpha: f64,
    pub beta: f64,
}

impl Prior {
    pub const fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Both parameters must be > 0.
    pub fn validate(&self) -> Result<BetaParams> {
        BetaParams::new(self.alpha, self.beta).ok_or(ValidationError::InvalidPrior)
    }

    /// Posterior Beta parameters for one group.
    pub fn update(&self, obs: &GroupObservation) -> Result<BetaParams> {
        self.validate()?
            .posterior(obs.successes, obs.trials)
            .ok_or(ValidationError::SuccessesExceedTrials)
    }
}

impl Default for Prior {
    fn default() -> Self {
        let jeffreys = BetaParams::jeffreys();
        Self::new(jeffreys.alpha, jeffreys.beta)
    }
}
