//! Bayesian A/B estimation of two binomial proportions.
//!
//! Given success/trial counts for two groups and a shared Beta prior, an
//! [`EstimationSession`] samples both Beta posteriors and their difference
//! once, then answers summary, inference and plot-data queries over those
//! draws:
//! - quantile and HDI/MAP summaries
//! - probability of superiority and Bayes factors for the difference
//! - KDE curves, histograms and interval regions for plotting
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod inference;
pub mod logging;
pub mod observation;
pub mod output;
pub mod plot;
pub mod sampler;
pub mod session;
pub mod summary;

pub use error::{Result, ValidationError};
pub use inference::{BayesFactorInference, Direction, InferenceQuery, ProbabilityInference};
pub use observation::{CountPair, GroupObservation, Prior};
pub use plot::{IntervalMethod, PlotData, PlotRequest};
pub use sampler::PosteriorDraws;
pub use session::{EstimationSession, SessionOptions, DEFAULT_DRAWS};
pub use summary::{HdiRequest, QuantileRequest, SummaryTable};
