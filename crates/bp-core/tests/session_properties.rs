//! Property-based tests for session invariants.

use bp_core::inference::{Direction, InferenceQuery};
use bp_core::summary::{HdiRequest, QuantileRequest};
use bp_core::{EstimationSession, SessionOptions, ValidationError};
use bp_math::bayes_factor::EvidenceStrength;
use bp_math::verbal::VerbalProbability;
use proptest::prelude::*;

/// (successes, trials) with successes <= trials.
fn group_strategy() -> impl Strategy<Value = (u32, u32)> {
    (1u32..500).prop_flat_map(|trials| (0..=trials, Just(trials)))
}

fn prior_strategy() -> impl Strategy<Value = (f64, f64)> {
    (0.2f64..5.0, 0.2f64..5.0)
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::GreaterThan), Just(Direction::LessThan)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn draws_have_length_n_and_lie_in_unit_interval(
        a in group_strategy(),
        b in group_strategy(),
        (alpha, beta) in prior_strategy(),
        n in 1usize..400,
        seed in any::<u64>(),
    ) {
        let options = SessionOptions::default().with_prior(alpha, beta).with_draws(n).with_seed(seed);
        let session = EstimationSession::new(&a, &b, options).unwrap();
        let (ta, tb, d) = session.get_posteriors();
        prop_assert_eq!(ta.len(), n);
        prop_assert_eq!(tb.len(), n);
        prop_assert_eq!(d.len(), n);
        for &x in ta.iter().chain(tb) {
            prop_assert!((0.0..=1.0).contains(&x), "draw {} outside [0, 1]", x);
        }
    }

    #[test]
    fn seeded_sessions_are_reproducible(
        a in group_strategy(),
        b in group_strategy(),
        seed in any::<u64>(),
    ) {
        let options = SessionOptions::default().with_draws(200).with_seed(seed);
        let first = EstimationSession::new(&a, &b, options).unwrap();
        let second = EstimationSession::new(&a, &b, options).unwrap();
        prop_assert_eq!(first.draws(), second.draws());
    }

    #[test]
    fn quantiles_are_monotone(
        a in group_strategy(),
        b in group_strategy(),
        mut levels in prop::collection::vec(0.0f64..=1.0, 1..8),
        seed in any::<u64>(),
    ) {
        levels.sort_by(f64::total_cmp);
        let options = SessionOptions::default().with_draws(300).with_seed(seed);
        let session = EstimationSession::new(&a, &b, options).unwrap();
        let table = session.quantile_summary(&QuantileRequest {
            quantiles: levels,
            mean: false,
            names: None,
        }).unwrap();
        for row in table.rows() {
            for pair in row.values.windows(2) {
                prop_assert!(pair[0] <= pair[1], "{:?}", row);
            }
        }
    }

    #[test]
    fn hdi_is_within_range(
        a in group_strategy(),
        b in group_strategy(),
        interval in 0.05f64..0.99,
        seed in any::<u64>(),
    ) {
        let options = SessionOptions::default().with_draws(300).with_seed(seed);
        let session = EstimationSession::new(&a, &b, options).unwrap();
        let table = session.hdi_summary(&HdiRequest { interval, mean: false, names: None }).unwrap();
        for (row, values) in table.rows().iter().zip(session.draws().by_parameter()) {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let (lo, hi) = (row.values[0], row.values[2]);
            prop_assert!(min <= lo && lo <= hi && hi <= max, "{:?}", row);
            let inside = values.iter().filter(|&&v| v >= lo && v <= hi).count();
            let needed = (interval * values.len() as f64).floor() as usize + 1;
            prop_assert!(inside >= needed, "{} draws inside, need {}", inside, needed);
        }
    }

    #[test]
    fn inference_statistics_are_well_formed(
        a in group_strategy(),
        b in group_strategy(),
        direction in direction_strategy(),
        value in -0.5f64..0.5,
        seed in any::<u64>(),
    ) {
        let options = SessionOptions::default().with_draws(200).with_seed(seed);
        let session = EstimationSession::new(&a, &b, options).unwrap();
        let query = InferenceQuery { direction, value, render: false, names: None };

        let prob = session.infer_delta_probability(&query).unwrap();
        prop_assert!((0.0..=1.0).contains(&prob.probability));
        prop_assert_eq!(Some(prob.verdict), VerbalProbability::from_probability(prob.probability));
        prop_assert!(prob.message.is_none());

        let bf = session.infer_delta_bayes_factor(&query).unwrap();
        prop_assert!(bf.bayes_factor >= 0.0);
        prop_assert_eq!(bf.strength, EvidenceStrength::from_bayes_factor(bf.bayes_factor));
    }

    #[test]
    fn successes_above_trials_always_rejected(
        trials in 1u32..500,
        excess in 1u32..100,
        b in group_strategy(),
    ) {
        let a = [trials + excess, trials];
        let err = EstimationSession::with_defaults(&a, &b).unwrap_err();
        prop_assert_eq!(err, ValidationError::SuccessesExceedTrials);
    }

    #[test]
    fn non_positive_priors_always_rejected(
        alpha in -5.0f64..=0.0,
        beta in 0.1f64..5.0,
    ) {
        let options = SessionOptions::default().with_prior(alpha, beta).with_draws(10);
        let err = EstimationSession::new(&[10, 50], &[20, 50], options).unwrap_err();
        prop_assert_eq!(err, ValidationError::InvalidPrior);
    }
}
