//! Session configuration files.
//!
//! A session can be described in TOML or JSON:
//!
//! ```toml
//! a = [10, 50]
//! b = [20, 50]
//! prior_alpha = 0.5
//! prior_beta = 0.5
//! draws = 10000
//! seed = 1000
//! ```
//!
//! Values are read loosely (any-length arrays, signed or textual draw
//! counts and seeds) and go through the same ordered validation as typed
//! callers, so a bad file reports the same message as a bad call.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ValidationError;
use crate::observation::{validate_pair, Prior};
use crate::session::{EstimationSession, SessionOptions, DEFAULT_DRAWS};

/// Errors that can occur while loading a session config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A number as written in a file or on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for RawNumber {
    fn from(v: i64) -> Self {
        RawNumber::Int(v)
    }
}

impl FromStr for RawNumber {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if let Ok(i) = s.parse::<i64>() {
            RawNumber::Int(i)
        } else if let Ok(f) = s.parse::<f64>() {
            RawNumber::Float(f)
        } else {
            RawNumber::Text(s.to_string())
        })
    }
}

impl RawNumber {
    /// A draw count: a positive integer (integral floats and digit strings
    /// are accepted).
    pub fn to_draws(&self) -> Result<usize, ValidationError> {
        let n = match self {
            RawNumber::Int(i) => Some(*i),
            RawNumber::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            RawNumber::Float(_) => None,
            RawNumber::Text(s) => s.trim().parse::<i64>().ok(),
        };
        match n {
            Some(n) if n > 0 => usize::try_from(n).map_err(|_| ValidationError::InvalidDrawCount),
            _ => Err(ValidationError::InvalidDrawCount),
        }
    }

    /// A seed: digits only, so negative numbers and floats are rejected.
    pub fn to_seed(&self) -> Result<u64, ValidationError> {
        let digits = match self {
            RawNumber::Int(i) => i.to_string(),
            RawNumber::Float(_) => return Err(ValidationError::InvalidSeed),
            RawNumber::Text(s) => s.clone(),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidSeed);
        }
        digits.parse().map_err(|_| ValidationError::InvalidSeed)
    }
}

/// Loosely typed session description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default)]
    pub a: Option<Vec<f64>>,
    #[serde(default)]
    pub b: Option<Vec<f64>>,
    #[serde(default)]
    pub prior_alpha: Option<f64>,
    #[serde(default)]
    pub prior_beta: Option<f64>,
    #[serde(default)]
    pub draws: Option<RawNumber>,
    #[serde(default)]
    pub seed: Option<RawNumber>,
}

impl SessionConfig {
    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Parse JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Overlay every value set in `other` onto `self`.
    pub fn merge(mut self, other: SessionConfig) -> Self {
        if other.a.is_some() {
            self.a = other.a;
        }
        if other.b.is_some() {
            self.b = other.b;
        }
        if other.prior_alpha.is_some() {
            self.prior_alpha = other.prior_alpha;
        }
        if other.prior_beta.is_some() {
            self.prior_beta = other.prior_beta;
        }
        if other.draws.is_some() {
            self.draws = other.draws;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        self
    }

    /// Run the ordered checks and return the typed sampling options.
    ///
    /// Order: group shape, successes against trials, prior, draws, seed.
    pub fn options(&self) -> Result<SessionOptions, ValidationError> {
        let empty = Vec::new();
        validate_pair(
            self.a.as_ref().unwrap_or(&empty),
            self.b.as_ref().unwrap_or(&empty),
        )?;

        let default_prior = Prior::default();
        let prior = Prior::new(
            self.prior_alpha.unwrap_or(default_prior.alpha),
            self.prior_beta.unwrap_or(default_prior.beta),
        );
        prior.validate()?;

        let draws = match &self.draws {
            Some(raw) => raw.to_draws()?,
            None => DEFAULT_DRAWS,
        };
        let seed = self.seed.as_ref().map(RawNumber::to_seed).transpose()?;

        Ok(SessionOptions { prior, draws, seed })
    }

    /// Validate and build a session.
    pub fn into_session(self) -> Result<EstimationSession, ValidationError> {
        let options = self.options()?;
        let empty = Vec::new();
        EstimationSession::new(
            self.a.as_ref().unwrap_or(&empty),
            self.b.as_ref().unwrap_or(&empty),
            options,
        )
    }
}

/// Load a session config, choosing the parser by file extension: `.json`
/// is JSON, anything else is TOML.
pub fn load_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let config = if is_json {
        SessionConfig::from_json_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        SessionConfig::from_toml_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    };
    debug!(path = %path.display(), json = is_json, "session config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE_TOML: &str = r#"
a = [10, 50]
b = [20, 50]
prior_alpha = 0.5
prior_beta = 0.5
draws = 10000
seed = 1000
"#;

    #[test]
    fn parses_toml_with_integer_counts() {
        let config = SessionConfig::from_toml_str(FIXTURE_TOML).unwrap();
        assert_eq!(config.a, Some(vec![10.0, 50.0]));
        assert_eq!(config.draws, Some(RawNumber::Int(10000)));
        let options = config.options().unwrap();
        assert_eq!(options.draws, 10000);
        assert_eq!(options.seed, Some(1000));
    }

    #[test]
    fn parses_json() {
        let config =
            SessionConfig::from_json_str(r#"{"a": [10, 50], "b": [20, 50], "seed": "42"}"#).unwrap();
        let options = config.options().unwrap();
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.draws, DEFAULT_DRAWS);
        assert_eq!(options.prior, Prior::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(SessionConfig::from_toml_str("a = [1, 2]\nsamples = 10\n").is_err());
    }

    #[test]
    fn ordered_checks() {
        let mut config = SessionConfig::from_toml_str(FIXTURE_TOML).unwrap();
        config.a = Some(vec![10.0, 50.0, 1.0]);
        config.prior_alpha = Some(-1.0);
        assert_eq!(config.options(), Err(ValidationError::MalformedObservation));

        config.a = Some(vec![50.0, 10.0]);
        assert_eq!(config.options(), Err(ValidationError::SuccessesExceedTrials));

        config.a = Some(vec![10.0, 50.0]);
        config.draws = Some(RawNumber::Int(-5));
        assert_eq!(config.options(), Err(ValidationError::InvalidPrior));

        config.prior_alpha = Some(0.5);
        assert_eq!(config.options(), Err(ValidationError::InvalidDrawCount));

        config.draws = Some(RawNumber::Int(100));
        config.seed = Some(RawNumber::Int(-1));
        assert_eq!(config.options(), Err(ValidationError::InvalidSeed));
    }

    #[test]
    fn missing_group_is_malformed() {
        let config = SessionConfig {
            b: Some(vec![1.0, 2.0]),
            ..SessionConfig::default()
        };
        assert_eq!(config.options(), Err(ValidationError::MalformedObservation));
    }

    #[test]
    fn raw_number_conversions() {
        assert_eq!("10".parse::<RawNumber>().unwrap().to_draws(), Ok(10));
        assert_eq!(RawNumber::Float(100.0).to_draws(), Ok(100));
        assert_eq!(RawNumber::Float(10.5).to_draws(), Err(ValidationError::InvalidDrawCount));
        assert_eq!(RawNumber::Int(0).to_draws(), Err(ValidationError::InvalidDrawCount));
        assert_eq!(RawNumber::Int(0).to_seed(), Ok(0));
        assert_eq!(RawNumber::Float(1.0).to_seed(), Err(ValidationError::InvalidSeed));
        assert_eq!(
            RawNumber::Text("abc".into()).to_seed(),
            Err(ValidationError::InvalidSeed)
        );
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = SessionConfig::from_toml_str(FIXTURE_TOML).unwrap();
        let cli = SessionConfig {
            seed: Some(RawNumber::Int(7)),
            ..SessionConfig::default()
        };
        let merged = base.merge(cli);
        assert_eq!(merged.seed, Some(RawNumber::Int(7)));
        assert_eq!(merged.a, Some(vec![10.0, 50.0]));
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("session.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(FIXTURE_TOML.as_bytes())
            .unwrap();
        let config = load_config(&toml_path).unwrap();
        assert_eq!(config.b, Some(vec![20.0, 50.0]));

        let json_path = dir.path().join("session.json");
        std::fs::write(&json_path, FIXTURE_TOML).unwrap();
        assert!(matches!(load_config(&json_path), Err(ConfigError::Json { .. })));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(load_config(&missing), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn config_builds_session() {
        let mut config = SessionConfig::from_toml_str(FIXTURE_TOML).unwrap();
        config.draws = Some(RawNumber::Int(500));
        let session = config.into_session().unwrap();
        assert_eq!(session.draws().len(), 500);
        assert_eq!(session.seed(), Some(1000));
    }
}
