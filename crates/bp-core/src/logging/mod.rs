//! Structured logging for the library and the CLI.
//!
//! - stdout is reserved for command payloads (JSON/MD/CSV output)
//! - stderr receives all log output, human-readable or JSON lines
//!
//! ```ignore
//! use bp_core::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, LOG_FORMAT_ENV, LOG_LEVEL_ENV};

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Later calls are ignored.
///
/// `BAYESPROP_LOG` and the CLI level take precedence; `RUST_LOG` directives
/// are honoured as-is only when neither is set.
pub fn init_logging(config: &LogConfig) {
    let filter = if std::env::var_os(LOG_LEVEL_ENV).is_none() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()))
    } else {
        EnvFilter::new(config.directive())
    };

    let result = match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
