//! Output formats for CLI payloads.
//!
//! JSON payloads are wrapped in an envelope carrying the schema version and
//! the command name. Markdown and CSV render the same data as tables.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::inference::{BayesFactorInference, ProbabilityInference};
use crate::sampler::PosteriorDraws;
use crate::summary::{SummaryTable, DEFAULT_NAMES};

/// Version of the JSON payload layout.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON envelope (default)
    #[default]
    Json,
    /// Markdown table
    Md,
    /// Comma-separated values with a header row
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Md => write!(f, "md"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Errors raised while rendering a payload.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
}

/// JSON envelope around a command result.
pub fn envelope<T: Serialize>(command: &str, result: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "schema_version": SCHEMA_VERSION,
        "command": command,
        "result": result,
    }))
}

/// Plain grid of cells, rendered as Markdown or CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&markdown_row(&self.header));
        out.push_str(&markdown_row(
            &self.header.iter().map(|_| "---".to_string()).collect::<Vec<_>>(),
        ));
        for row in &self.rows {
            out.push_str(&markdown_row(row));
        }
        out
    }

    /// RFC 4180 rendering with `\n` record terminators.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn render(&self, format: OutputFormat) -> Result<Option<String>, OutputError> {
        Ok(match format {
            OutputFormat::Json => None,
            OutputFormat::Md => Some(self.to_markdown()),
            OutputFormat::Csv => Some(self.to_csv()?),
        })
    }
}

fn markdown_row(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", escaped.join(" | "))
}

/// Shortest round-trip rendering; non-finite values as `inf`/`-inf`/`nan`.
pub fn format_value(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x == f64::INFINITY {
        "inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{x}")
    }
}

impl From<&SummaryTable> for TextTable {
    fn from(table: &SummaryTable) -> Self {
        TextTable {
            header: table.columns(),
            rows: table
                .rows()
                .iter()
                .map(|row| {
                    row.values
                        .iter()
                        .map(|&v| format_value(v))
                        .chain(std::iter::once(row.parameter.clone()))
                        .collect()
                })
                .collect(),
        }
    }
}

impl From<&PosteriorDraws> for TextTable {
    fn from(draws: &PosteriorDraws) -> Self {
        TextTable {
            header: DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
            rows: (0..draws.len())
                .map(|i| {
                    draws
                        .by_parameter()
                        .iter()
                        .map(|values| format_value(values[i]))
                        .collect()
                })
                .collect(),
        }
    }
}

impl From<&ProbabilityInference> for TextTable {
    fn from(result: &ProbabilityInference) -> Self {
        TextTable {
            header: ["direction", "value", "probability", "label", "message"]
                .map(String::from)
                .to_vec(),
            rows: vec![vec![
                result.direction.to_string(),
                format_value(result.value),
                format_value(result.probability),
                result.label().to_string(),
                result.message.clone().unwrap_or_default(),
            ]],
        }
    }
}

impl From<&BayesFactorInference> for TextTable {
    fn from(result: &BayesFactorInference) -> Self {
        TextTable {
            header: ["direction", "value", "bayes_factor", "p_h1", "p_h2", "label", "message"]
                .map(String::from)
                .to_vec(),
            rows: vec![vec![
                result.direction.to_string(),
                format_value(result.value),
                format_value(result.bayes_factor),
                format_value(result.p_h1),
                format_value(result.p_h2),
                result.label().to_string(),
                result.message.clone().unwrap_or_default(),
            ]],
        }
    }
}

/// Render a result in the requested format.
///
/// JSON serializes `result` inside the envelope; Markdown and CSV render its
/// table view.
pub fn render<'a, T>(command: &str, result: &'a T, format: OutputFormat) -> Result<String, OutputError>
where
    T: Serialize,
    TextTable: From<&'a T>,
{
    match TextTable::from(result).render(format)? {
        Some(text) => Ok(text),
        None => Ok(envelope(command, result)?),
    }
}
