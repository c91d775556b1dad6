//! Plot-ready data for the three posteriors.
//!
//! Nothing here draws. Each parameter gets its KDE curve, a density
//! histogram of the raw draws, a centre line and the shaded interval region,
//! all as plain serializable data for an external plotting front end.

use bp_math::{
    gaussian_kde, hdi_sorted, quantile_sorted, scott_histogram, sorted, Histogram, Interval,
    KdeCurve, DEFAULT_KDE_POINTS,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, ValidationError};
use crate::sampler::PosteriorDraws;
use crate::summary::{resolve_names, DEFAULT_INTERVAL};

/// Grid resolution of the plotted KDE curves.
pub const PLOT_KDE_POINTS: usize = 100;

/// Headroom of the delta reference line over the highest density.
const REFERENCE_LINE_HEADROOM: f64 = 1.2;

/// How the shaded interval and the centre line are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum IntervalMethod {
    /// Equal-tailed credible interval; centre line at the median.
    Quantile { lower: f64, upper: f64 },
    /// Highest-density interval; centre line at the MAP.
    Hdi { interval: f64 },
}

impl Default for IntervalMethod {
    fn default() -> Self {
        IntervalMethod::Hdi {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl IntervalMethod {
    /// Credible interval from exactly two quantile levels.
    pub fn quantiles(bounds: &[f64]) -> Result<Self> {
        let method = match bounds {
            [lower, upper] => IntervalMethod::Quantile {
                lower: *lower,
                upper: *upper,
            },
            _ => return Err(ValidationError::QuantileBounds),
        };
        method.validate()?;
        Ok(method)
    }

    pub fn hdi(interval: f64) -> Result<Self> {
        let method = IntervalMethod::Hdi { interval };
        method.validate()?;
        Ok(method)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            IntervalMethod::Quantile { lower, upper } => {
                let in_range = |q: f64| (0.0..=1.0).contains(&q);
                if !in_range(lower) || !in_range(upper) {
                    return Err(ValidationError::QuantileOutOfRange);
                }
            }
            IntervalMethod::Hdi { interval } => {
                if interval.is_nan() || interval <= 0.0 || interval >= 1.0 {
                    return Err(ValidationError::InvalidInterval);
                }
            }
        }
        Ok(())
    }

    fn bounds(&self, ordered: &[f64]) -> Option<Interval> {
        match *self {
            IntervalMethod::Quantile { lower, upper } => {
                let lower = quantile_sorted(ordered, lower);
                let upper = quantile_sorted(ordered, upper);
                (lower.is_finite() && upper.is_finite()).then_some(Interval { lower, upper })
            }
            IntervalMethod::Hdi { interval } => hdi_sorted(ordered, interval),
        }
    }

    fn centre(&self, values: &[f64], ordered: &[f64]) -> Option<f64> {
        match self {
            IntervalMethod::Quantile { .. } => {
                let median = quantile_sorted(ordered, 0.5);
                median.is_finite().then_some(median)
            }
            IntervalMethod::Hdi { .. } => gaussian_kde(values, DEFAULT_KDE_POINTS)?.mode(),
        }
    }
}

/// Options for [`build_plot_data`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotRequest {
    pub method: IntervalMethod,
    pub names: Option<Vec<String>>,
    /// Position of the vertical reference line on the delta panel.
    pub delta_line: Option<f64>,
}

/// Vertical dashed line from 0 to the curve at `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CentreLine {
    pub x: f64,
    pub y: f64,
}

/// Slice of the KDE curve strictly inside the interval bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Everything needed to draw one parameter's panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterPlot {
    pub name: String,
    pub kde: KdeCurve,
    pub histogram: Histogram,
    pub centre: CentreLine,
    pub bounds: Interval,
    pub region: Region,
}

/// Vertical reference line on the delta panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Plot data for theta_a, theta_b and delta, in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    pub method: IntervalMethod,
    pub parameters: Vec<ParameterPlot>,
    pub delta_line: Option<ReferenceLine>,
}

impl PlotData {
    pub fn parameter(&self, name: &str) -> Option<&ParameterPlot> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Build the plot artifacts for every parameter.
///
/// Fails with [`ValidationError::InvalidDraws`] unless all three panels can
/// be built; empty or non-finite draws have no density curve.
pub fn build_plot_data(draws: &PosteriorDraws, request: &PlotRequest) -> Result<PlotData> {
    request.method.validate()?;
    let names = resolve_names(request.names.as_deref())?;

    let [theta_a, theta_b, delta] = draws.by_parameter();
    let [name_a, name_b, name_delta] = names;
    let theta_a = parameter_plot(theta_a, name_a, &request.method)?;
    let theta_b = parameter_plot(theta_b, name_b, &request.method)?;
    let delta = parameter_plot(delta, name_delta, &request.method)?;

    let delta_line = match request.delta_line {
        Some(x) => {
            let max = delta
                .kde
                .max_density()
                .ok_or(ValidationError::InvalidDraws)?;
            Some(ReferenceLine {
                x,
                y0: 0.0,
                y1: max * REFERENCE_LINE_HEADROOM,
            })
        }
        None => None,
    };
    let parameters = vec![theta_a, theta_b, delta];

    debug!(
        method = ?request.method,
        panels = parameters.len(),
        delta_line = ?request.delta_line,
        "plot data built"
    );
    Ok(PlotData {
        method: request.method,
        parameters,
        delta_line,
    })
}

fn parameter_plot(values: &[f64], name: String, method: &IntervalMethod) -> Result<ParameterPlot> {
    build_panel(values, name, method).ok_or(ValidationError::InvalidDraws)
}

fn build_panel(values: &[f64], name: String, method: &IntervalMethod) -> Option<ParameterPlot> {
    let ordered = sorted(values);
    let kde = gaussian_kde(values, PLOT_KDE_POINTS)?;
    if kde.is_degenerate() {
        warn!(parameter = %name, "draws have no spread; plotting a point mass");
    }
    let histogram = scott_histogram(values)?;
    let bounds = method.bounds(&ordered)?;

    let centre_x = method.centre(values, &ordered)?;
    let centre = CentreLine {
        x: centre_x,
        y: kde.density_near(centre_x)?,
    };

    let (x, y) = kde
        .x
        .iter()
        .zip(&kde.density)
        .filter(|(x, _)| bounds.contains_open(**x))
        .map(|(x, y)| (*x, *y))
        .unzip();

    Some(ParameterPlot {
        name,
        kde,
        histogram,
        centre,
        bounds,
        region: Region { x, y },
    })
}
