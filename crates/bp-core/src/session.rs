//! Estimation session: validated inputs plus the posterior draws.
//!
//! A session validates its inputs, updates the shared prior for each group
//! and samples both posteriors exactly once. Every summary, inference and
//! plot call afterwards reads the same immutable draws.

use bp_math::BetaParams;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::inference::{
    infer_bayes_factor, infer_probability, BayesFactorInference, InferenceQuery,
    ProbabilityInference,
};
use crate::observation::{validate_pair, CountPair, GroupObservation, Prior};
use crate::plot::{build_plot_data, PlotData, PlotRequest};
use crate::sampler::{sample_posteriors, PosteriorDraws};
use crate::summary::{hdi_summary, quantile_summary, HdiRequest, QuantileRequest, SummaryTable};

/// Default number of posterior draws per group.
pub const DEFAULT_DRAWS: usize = 10_000;

/// Sampling options shared by both groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionOptions {
    pub prior: Prior,
    pub draws: usize,
    /// Fixed seed for reproducible draws; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            prior: Prior::default(),
            draws: DEFAULT_DRAWS,
            seed: None,
        }
    }
}

impl SessionOptions {
    pub fn with_prior(mut self, alpha: f64, beta: f64) -> Self {
        self.prior = Prior::new(alpha, beta);
        self
    }

    pub fn with_draws(mut self, draws: usize) -> Self {
        self.draws = draws;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Posterior Beta parameters of both groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosteriorParams {
    pub a: BetaParams,
    pub b: BetaParams,
}

/// A two-group Beta-Binomial estimate.
#[derive(Debug, Clone)]
pub struct EstimationSession {
    a: GroupObservation,
    b: GroupObservation,
    options: SessionOptions,
    posteriors: PosteriorParams,
    draws: PosteriorDraws,
}

impl EstimationSession {
    /// Validate the inputs and sample both posteriors.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// group shape, successes against trials, prior, draw count.
    pub fn new<A, B>(a: &A, b: &B, options: SessionOptions) -> Result<Self>
    where
        A: CountPair + ?Sized,
        B: CountPair + ?Sized,
    {
        let (obs_a, obs_b) = validate_pair(a, b)?;
        options.prior.validate()?;
        if options.draws == 0 {
            return Err(ValidationError::InvalidDrawCount);
        }

        let posteriors = PosteriorParams {
            a: options.prior.update(&obs_a)?,
            b: options.prior.update(&obs_b)?,
        };
        debug!(
            a_successes = obs_a.successes(),
            a_trials = obs_a.trials(),
            b_successes = obs_b.successes(),
            b_trials = obs_b.trials(),
            prior_alpha = options.prior.alpha,
            prior_beta = options.prior.beta,
            draws = options.draws,
            seed = ?options.seed,
            "sampling posteriors"
        );

        let draws = sample_posteriors(&posteriors.a, &posteriors.b, options.draws, options.seed)
            .ok_or(ValidationError::InvalidPrior)?;
        debug!(
            posterior_a = ?posteriors.a,
            posterior_b = ?posteriors.b,
            "posteriors sampled"
        );

        Ok(Self {
            a: obs_a,
            b: obs_b,
            options,
            posteriors,
            draws,
        })
    }

    /// Session with the Jeffreys prior, 10000 draws and no seed.
    pub fn with_defaults<A, B>(a: &A, b: &B) -> Result<Self>
    where
        A: CountPair + ?Sized,
        B: CountPair + ?Sized,
    {
        Self::new(a, b, SessionOptions::default())
    }

    pub fn a(&self) -> &GroupObservation {
        &self.a
    }

    pub fn b(&self) -> &GroupObservation {
        &self.b
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn prior(&self) -> &Prior {
        &self.options.prior
    }

    pub fn seed(&self) -> Option<u64> {
        self.options.seed
    }

    pub fn posterior_params(&self) -> &PosteriorParams {
        &self.posteriors
    }

    pub fn draws(&self) -> &PosteriorDraws {
        &self.draws
    }

    /// Draws of theta_a, theta_b and delta = theta_b - theta_a.
    pub fn get_posteriors(&self) -> (&[f64], &[f64], &[f64]) {
        (
            self.draws.theta_a(),
            self.draws.theta_b(),
            self.draws.delta(),
        )
    }

    pub fn quantile_summary(&self, request: &QuantileRequest) -> Result<SummaryTable> {
        quantile_summary(&self.draws, request)
    }

    pub fn hdi_summary(&self, request: &HdiRequest) -> Result<SummaryTable> {
        hdi_summary(&self.draws, request)
    }

    pub fn infer_delta_probability(&self, query: &InferenceQuery) -> Result<ProbabilityInference> {
        infer_probability(self.draws.delta(), query)
    }

    pub fn infer_delta_bayes_factor(&self, query: &InferenceQuery) -> Result<BayesFactorInference> {
        infer_bayes_factor(self.draws.delta(), query)
    }

    pub fn plot_data(&self, request: &PlotRequest) -> Result<PlotData> {
        build_plot_data(&self.draws, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SessionOptions {
        SessionOptions::default().with_draws(2_000).with_seed(1000)
    }

    #[test]
    fn session_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EstimationSession>();
    }

    #[test]
    fn draws_have_requested_length() {
        let session = EstimationSession::new(&[10, 50], &[20, 50], seeded()).unwrap();
        let (a, b, d) = session.get_posteriors();
        assert_eq!((a.len(), b.len(), d.len()), (2_000, 2_000, 2_000));
        assert!(a.iter().chain(b).all(|&x| x > 0.0 && x < 1.0));
    }

    #[test]
    fn posterior_params_follow_conjugate_update() {
        let session = EstimationSession::new(&[10, 50], &[20, 50], seeded()).unwrap();
        let params = session.posterior_params();
        assert_eq!(params.a, BetaParams::new(10.5, 40.5).unwrap());
        assert_eq!(params.b, BetaParams::new(20.5, 30.5).unwrap());
    }

    #[test]
    fn validation_order() {
        let bad_prior = seeded().with_prior(-1.0, 0.5);
        // successes > trials is reported before the prior.
        assert_eq!(
            EstimationSession::new(&[50, 10], &[20, 50], bad_prior).unwrap_err(),
            ValidationError::SuccessesExceedTrials
        );
        assert_eq!(
            EstimationSession::new(&[10, 50], &[20, 50], bad_prior).unwrap_err(),
            ValidationError::InvalidPrior
        );
        let no_draws = seeded().with_prior(-1.0, 0.5).with_draws(0);
        assert_eq!(
            EstimationSession::new(&[10, 50], &[20, 50], no_draws).unwrap_err(),
            ValidationError::InvalidPrior
        );
        assert_eq!(
            EstimationSession::new(&[10, 50], &[20, 50], seeded().with_draws(0)).unwrap_err(),
            ValidationError::InvalidDrawCount
        );
    }

    #[test]
    fn accepts_any_count_pair() {
        let a = vec![10.0, 50.0];
        let b = (20u32, 50u32);
        let session = EstimationSession::new(&a, &b, seeded()).unwrap();
        assert_eq!(session.a().successes(), 10.0);
        assert_eq!(session.b().trials(), 50.0);
        assert_eq!(session.seed(), Some(1000));
    }

    #[test]
    fn summaries_are_recomputed_identically() {
        let session = EstimationSession::new(&[10, 50], &[20, 50], seeded()).unwrap();
        let first = session.quantile_summary(&QuantileRequest::default()).unwrap();
        let second = session.quantile_summary(&QuantileRequest::default()).unwrap();
        assert_eq!(first, second);
    }
}
