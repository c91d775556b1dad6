//! End-to-end scenarios on the reference A/B fixture.
//!
//! a = 10/50, b = 20/50, Jeffreys prior, 10000 draws, seed 1000. The draws
//! come from a different generator than the reference numbers, so values are
//! compared with Monte-Carlo tolerance.

use bp_core::inference::{Direction, InferenceQuery};
use bp_core::plot::{IntervalMethod, PlotRequest};
use bp_core::summary::{HdiRequest, QuantileRequest};
use bp_core::{EstimationSession, SessionOptions, ValidationError};
use bp_math::bayes_factor::{EvidenceStrength, TEN_POW_1_5};

const REFERENCE_QUANTILES: [[f64; 3]; 3] = [
    [0.10594123533474246, 0.20127340652543865, 0.32294649108461715],
    [0.2744412955144984, 0.3999900504080393, 0.5396945573617622],
    [0.019031409978063265, 0.1974645057248544, 0.3708045045911511],
];

fn fixture() -> EstimationSession {
    let options = SessionOptions::default().with_seed(1000);
    EstimationSession::new(&[10, 50], &[20, 50], options).expect("fixture session")
}

#[test]
fn quantile_summary_matches_reference() {
    let session = fixture();
    let table = session
        .quantile_summary(&QuantileRequest::default())
        .expect("quantile summary");

    assert_eq!(
        table.columns(),
        vec!["0.025", "0.5", "0.975", "mean", "parameter"]
    );
    for (row, expected) in table.rows().iter().zip(REFERENCE_QUANTILES) {
        for (got, want) in row.values.iter().zip(expected) {
            assert!(
                (got - want).abs() < 0.02,
                "{}: got {got}, reference {want}",
                row.parameter
            );
        }
    }
}

#[test]
fn means_match_closed_form() {
    let session = fixture();
    let table = session
        .quantile_summary(&QuantileRequest::default())
        .expect("quantile summary");
    let params = session.posterior_params();

    let mean_a = table.value("theta_a", "mean").unwrap();
    let mean_b = table.value("theta_b", "mean").unwrap();
    let mean_d = table.value("delta", "mean").unwrap();
    assert!((mean_a - params.a.mean()).abs() < 0.005);
    assert!((mean_b - params.b.mean()).abs() < 0.005);
    assert!((mean_d - (params.b.mean() - params.a.mean())).abs() < 0.005);
}

#[test]
fn get_posteriors_are_aligned() {
    let session = fixture();
    let (a, b, delta) = session.get_posteriors();
    assert_eq!(a.len(), 10_000);
    assert_eq!(b.len(), 10_000);
    assert_eq!(delta.len(), 10_000);
    for i in 0..a.len() {
        assert_eq!(delta[i], b[i] - a[i]);
    }
}

#[test]
fn same_seed_same_draws() {
    let first = fixture();
    let second = fixture();
    assert_eq!(first.draws(), second.draws());
}

#[test]
fn hdi_summary_brackets_map() {
    let session = fixture();
    let table = session.hdi_summary(&HdiRequest::default()).expect("hdi summary");
    assert_eq!(
        table.columns(),
        vec!["0.025", "MAP", "0.975", "mean", "parameter"]
    );

    let map_a = table.value("theta_a", "MAP").unwrap();
    // Mode of Beta(10.5, 40.5).
    assert!((map_a - 9.5 / 49.0).abs() < 0.02, "MAP {map_a}");

    for row in table.rows() {
        let (lo, map, hi) = (row.values[0], row.values[1], row.values[2]);
        assert!(lo < map && map < hi, "{row:?}");
    }

    // The HDI is never wider than the equal-tailed interval by more than noise.
    let quantiles = session
        .quantile_summary(&QuantileRequest::default())
        .unwrap();
    for name in ["theta_a", "theta_b", "delta"] {
        let hdi_width = table.value(name, "0.975").unwrap() - table.value(name, "0.025").unwrap();
        let eti_width =
            quantiles.value(name, "0.975").unwrap() - quantiles.value(name, "0.025").unwrap();
        assert!(hdi_width <= eti_width + 1e-3, "{name}: {hdi_width} > {eti_width}");
    }
}

#[test]
fn probability_of_superiority() {
    let session = fixture();
    let result = session
        .infer_delta_probability(&InferenceQuery::default())
        .expect("probability");
    assert!((result.probability - 0.9863).abs() < 0.01, "{}", result.probability);
    assert_eq!(result.label(), "almost certain");
    let message = result.message.expect("message rendered");
    assert!(message.starts_with("the probability that delta is greater than 0 is"));

    let reverse = session
        .infer_delta_probability(&InferenceQuery::parse("less than", 0.0).unwrap())
        .unwrap();
    assert!((result.probability + reverse.probability - 1.0).abs() < 1e-9);
    assert_eq!(reverse.label(), "almost certainly not");
}

#[test]
fn bayes_factor_is_strong_evidence() {
    let session = fixture();
    let result = session
        .infer_delta_bayes_factor(&InferenceQuery::default())
        .expect("bayes factor");
    assert!(result.bayes_factor > TEN_POW_1_5, "{}", result.bayes_factor);
    assert_eq!(
        result.strength,
        EvidenceStrength::from_bayes_factor(result.bayes_factor)
    );
    assert!(result.strength >= EvidenceStrength::VeryStrong);
    assert!((result.p_h1 + result.p_h2 - 1.0).abs() < 1e-12);

    // Far above every draw: no support at all.
    let query = InferenceQuery {
        direction: Direction::GreaterThan,
        value: 0.99,
        ..InferenceQuery::default()
    };
    let result = session.infer_delta_bayes_factor(&query).unwrap();
    assert_eq!(result.bayes_factor, 0.0);
    assert_eq!(result.label(), "negative");
}

#[test]
fn invalid_inference_arguments() {
    assert_eq!(
        InferenceQuery::parse("more than", 0.0),
        Err(ValidationError::InvalidDirection)
    );
    let session = fixture();
    let query = InferenceQuery {
        names: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
        ..InferenceQuery::default()
    };
    assert_eq!(
        session.infer_delta_probability(&query).unwrap_err(),
        ValidationError::InvalidNames
    );
}

#[test]
fn plot_data_for_both_methods() {
    let session = fixture();
    let hdi = session
        .plot_data(&PlotRequest {
            delta_line: Some(0.0),
            ..PlotRequest::default()
        })
        .expect("hdi plot data");
    assert_eq!(hdi.parameters.len(), 3);
    assert!(hdi.delta_line.is_some());

    let quantile = session
        .plot_data(&PlotRequest {
            method: IntervalMethod::quantiles(&[0.025, 0.975]).unwrap(),
            ..PlotRequest::default()
        })
        .expect("quantile plot data");
    let delta = quantile.parameter("delta").unwrap();
    assert!((delta.bounds.lower - REFERENCE_QUANTILES[2][0]).abs() < 0.02);
    assert!((delta.bounds.upper - REFERENCE_QUANTILES[2][2]).abs() < 0.02);
    assert!((delta.centre.x - REFERENCE_QUANTILES[2][1]).abs() < 0.02);
}

#[test]
fn rejects_successes_above_trials() {
    let err = EstimationSession::with_defaults(&[50, 10], &[20, 50]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "the count of successes for a and/or b exceeds the number of trials"
    );
}

#[test]
fn rejects_negative_prior() {
    let options = SessionOptions::default().with_prior(-1.0, 0.5);
    let err = EstimationSession::new(&[10, 50], &[20, 50], options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "the prior_alpha and/or prior_beta parameters must be > 0"
    );
}

#[test]
fn accepts_small_draw_counts_and_explicit_prior() {
    let options = SessionOptions::default()
        .with_prior(0.1, 0.1)
        .with_draws(3)
        .with_seed(1000);
    let session = EstimationSession::new(&vec![10.0, 50.0], &(20.0, 50.0), options).unwrap();
    let (a, b, d) = session.get_posteriors();
    assert_eq!((a.len(), b.len(), d.len()), (3, 3, 3));
}
