//! Validation errors for estimation sessions.
//!
//! Every failure is raised before any sampling or summarization runs and
//! carries a fixed message, so callers may match on the text as well as
//! on the variant.

use thiserror::Error;

/// Result type alias for bayesprop operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Input validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a and/or b must be a [successes, trials] pair of non-negative numbers")]
    MalformedObservation,

    #[error("the count of successes for a and/or b exceeds the number of trials")]
    SuccessesExceedTrials,

    #[error("the prior_alpha and/or prior_beta parameters must be > 0")]
    InvalidPrior,

    #[error("n must be a positive integer")]
    InvalidDrawCount,

    #[error("seed must be a positive integer or None")]
    InvalidSeed,

    #[error("posterior draws must be finite and non-empty")]
    InvalidDraws,

    #[error("quantiles must be a list of length > 0")]
    EmptyQuantiles,

    #[error("quantiles must be between 0 and 1")]
    QuantileOutOfRange,

    #[error("quantiles must be a list of length 2")]
    QuantileBounds,

    #[error("interval must be a float > 0 and < 1")]
    InvalidInterval,

    #[error("names must be a list of length 3")]
    InvalidNames,

    #[error("direction must be 'greater than' or 'less than'")]
    InvalidDirection,

    #[error("probability must be between 0 and 1")]
    ProbabilityOutOfRange,
}

impl ValidationError {
    /// Stable error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::MalformedObservation => 40,
            ValidationError::SuccessesExceedTrials => 41,
            ValidationError::InvalidPrior => 42,
            ValidationError::InvalidDrawCount => 43,
            ValidationError::InvalidSeed => 44,
            ValidationError::InvalidDraws => 45,
            ValidationError::EmptyQuantiles => 50,
            ValidationError::QuantileOutOfRange => 51,
            ValidationError::QuantileBounds => 52,
            ValidationError::InvalidInterval => 53,
            ValidationError::InvalidNames => 54,
            ValidationError::InvalidDirection => 60,
            ValidationError::ProbabilityOutOfRange => 61,
        }
    }
}
