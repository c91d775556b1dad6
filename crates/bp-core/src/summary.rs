//! Tabular summaries of the posterior draws.
//!
//! Two modes, both one row per parameter (theta_a, theta_b, delta):
//! - quantile: requested quantiles plus an optional mean
//! - hdi: HDI lower bound, KDE-based MAP, HDI upper bound plus an optional mean
//!
//! Column labels are part of the output contract. Quantile columns use the
//! shortest round-trip rendering of each level (`0.025`, `0.5`); HDI bounds
//! use five significant digits (`%.5g`).

use bp_math::{gaussian_kde, hdi_sorted, mean, quantile_sorted, sorted, DEFAULT_KDE_POINTS};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, ValidationError};
use crate::sampler::PosteriorDraws;

/// Default parameter labels, in draw order.
pub const DEFAULT_NAMES: [&str; 3] = ["theta_a", "theta_b", "delta"];

/// Default quantile levels.
pub const DEFAULT_QUANTILES: [f64; 3] = [0.025, 0.5, 0.975];

/// Default HDI probability mass.
pub const DEFAULT_INTERVAL: f64 = 0.95;

/// Label of the trailing parameter column.
pub const PARAMETER_COLUMN: &str = "parameter";

/// Options for a quantile summary.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileRequest {
    pub quantiles: Vec<f64>,
    pub mean: bool,
    pub names: Option<Vec<String>>,
}

impl Default for QuantileRequest {
    fn default() -> Self {
        Self {
            quantiles: DEFAULT_QUANTILES.to_vec(),
            mean: true,
            names: None,
        }
    }
}

/// Options for an HDI/MAP summary.
#[derive(Debug, Clone, PartialEq)]
pub struct HdiRequest {
    pub interval: f64,
    pub mean: bool,
    pub names: Option<Vec<String>>,
}

impl Default for HdiRequest {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            mean: true,
            names: None,
        }
    }
}

/// One summarized parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub parameter: String,
    pub values: Vec<f64>,
}

/// Row-per-parameter summary with named value columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    columns: Vec<String>,
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Value column labels, without the trailing parameter column.
    pub fn value_columns(&self) -> &[String] {
        &self.columns
    }

    /// All column labels: value columns then `parameter`.
    pub fn columns(&self) -> Vec<String> {
        let mut cols = self.columns.clone();
        cols.push(PARAMETER_COLUMN.to_string());
        cols
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Value at (parameter, column).
    pub fn value(&self, parameter: &str, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.parameter == parameter)
            .and_then(|r| r.values.get(col).copied())
    }

}

/// Resolve the three parameter labels, falling back to the defaults.
pub fn resolve_names(names: Option<&[String]>) -> Result<[String; 3]> {
    match names {
        None => Ok(DEFAULT_NAMES.map(String::from)),
        Some([a, b, d]) => Ok([a.clone(), b.clone(), d.clone()]),
        Some(_) => Err(ValidationError::InvalidNames),
    }
}

/// Summarize draws by quantiles (and optionally the mean).
pub fn quantile_summary(draws: &PosteriorDraws, request: &QuantileRequest) -> Result<SummaryTable> {
    if request.quantiles.is_empty() {
        return Err(ValidationError::EmptyQuantiles);
    }
    if request
        .quantiles
        .iter()
        .any(|q| q.is_nan() || !(0.0..=1.0).contains(q))
    {
        return Err(ValidationError::QuantileOutOfRange);
    }
    let names = resolve_names(request.names.as_deref())?;

    let mut columns: Vec<String> = request.quantiles.iter().map(|&q| quantile_label(q)).collect();
    if request.mean {
        columns.push("mean".to_string());
    }

    let rows = draws
        .by_parameter()
        .iter()
        .zip(names)
        .map(|(values, parameter)| {
            let ordered = sorted(values);
            let mut row: Vec<f64> = request
                .quantiles
                .iter()
                .map(|&q| quantile_sorted(&ordered, q))
                .collect();
            if request.mean {
                row.push(mean(values));
            }
            SummaryRow {
                parameter,
                values: row,
            }
        })
        .collect();

    debug!(quantiles = ?request.quantiles, mean = request.mean, "quantile summary computed");
    Ok(SummaryTable { columns, rows })
}

/// Summarize draws by HDI bounds and MAP (and optionally the mean).
pub fn hdi_summary(draws: &PosteriorDraws, request: &HdiRequest) -> Result<SummaryTable> {
    let interval = request.interval;
    if interval.is_nan() || interval <= 0.0 || interval >= 1.0 {
        return Err(ValidationError::InvalidInterval);
    }
    let names = resolve_names(request.names.as_deref())?;

    let tail = (1.0 - interval) / 2.0;
    let mut columns = vec![
        format_significant(tail, 5),
        "MAP".to_string(),
        format_significant(interval + tail, 5),
    ];
    if request.mean {
        columns.push("mean".to_string());
    }

    let rows = draws
        .by_parameter()
        .iter()
        .zip(names)
        .map(|(values, parameter)| {
            let ordered = sorted(values);
            let (lower, upper) = hdi_sorted(&ordered, interval)
                .map(|iv| (iv.lower, iv.upper))
                .unwrap_or((f64::NAN, f64::NAN));
            let map = match gaussian_kde(values, DEFAULT_KDE_POINTS) {
                Some(curve) => {
                    if curve.is_degenerate() {
                        warn!(parameter = %parameter, "draws have no spread; MAP is the constant value");
                    }
                    curve.mode().unwrap_or(f64::NAN)
                }
                None => f64::NAN,
            };
            let mut row = vec![lower, map, upper];
            if request.mean {
                row.push(mean(values));
            }
            SummaryRow {
                parameter,
                values: row,
            }
        })
        .collect();

    debug!(interval, mean = request.mean, "hdi summary computed");
    Ok(SummaryTable { columns, rows })
}

/// Shortest round-trip rendering of a quantile level, always with a
/// fractional part (`0.5`, `1.0`). Levels below `1e-4` switch to exponent
/// form with a signed two-digit exponent (`1e-05`, `2.5e-05`).
pub fn quantile_label(q: f64) -> String {
    if q != 0.0 && q.is_finite() && q.abs() < 1e-4 {
        let sci = format!("{q:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            None => sci,
        };
    }
    let s = format!("{q}");
    if s.contains(['.', 'e', 'N', 'i']) {
        s
    } else {
        format!("{s}.0")
    }
}

/// `printf`-style `%.{digits}g` rendering.
///
/// Uses fixed notation when the decimal exponent lies in `[-4, digits)` and
/// scientific notation otherwise; trailing zeros are dropped in both.
pub fn format_significant(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci.clone(), 0),
    };

    if exp < -4 || exp >= digits as i32 {
        let mantissa = trim_fraction(&mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x))
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
