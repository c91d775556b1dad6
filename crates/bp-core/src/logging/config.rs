//! Logging configuration.
//!
//! Resolved in order, later sources winning:
//! - `BAYESPROP_LOG` (a level), or `RUST_LOG` when it is unset
//! - `BAYESPROP_LOG_FORMAT`
//! - CLI flags (`--verbose`, `--quiet`, `--log-format`)

use serde::{Deserialize, Serialize};

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "BAYESPROP_LOG";

/// Environment variable holding the log format.
pub const LOG_FORMAT_ENV: &str = "BAYESPROP_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Warnings and errors only (default; library events are debug-level).
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// One step more verbose, saturating at trace.
    pub fn more_verbose(self) -> Self {
        match self {
            LogLevel::Off | LogLevel::Error => LogLevel::Warn,
            LogLevel::Warn => LogLevel::Info,
            LogLevel::Info => LogLevel::Debug,
            LogLevel::Debug | LogLevel::Trace => LogLevel::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        };
        f.write_str(s)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Include timestamps in human output.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Warn,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Config from the process environment and CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// Config from an arbitrary variable lookup and CLI overrides.
    pub fn from_lookup<F>(lookup: F, cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LogConfig::default();

        if let Some(val) = lookup(LOG_LEVEL_ENV) {
            if let Ok(level) = val.parse::<LogLevel>() {
                config.level = level;
            }
        } else if let Some(val) = lookup("RUST_LOG") {
            if let Some(level) = level_from_directives(&val) {
                config.level = level;
            }
        }

        if let Some(format) = lookup(LOG_FORMAT_ENV).and_then(|v| v.parse().ok()) {
            config.format = format;
        }

        if let Some(level) = cli_level {
            config.level = level;
        }
        if let Some(format) = cli_format {
            config.format = format;
        }
        config
    }

    /// Toggle timestamps in human output (`--no-log-timestamps`).
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// `EnvFilter` directive for this crate's events.
    pub fn directive(&self) -> String {
        format!("bp_core={level},bp_math={level},bayesprop={level}", level = self.level)
    }
}

// Coarse read of RUST_LOG: the most verbose level mentioned wins.
fn level_from_directives(val: &str) -> Option<LogLevel> {
    let val = val.to_lowercase();
    [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ]
    .into_iter()
    .find(|level| val.contains(&level.to_string()))
}
