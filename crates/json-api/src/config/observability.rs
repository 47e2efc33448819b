//! Logging Config

use clap::{ArgAction, Args};

/// Noisy dependency targets capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: [&str; 5] = ["h2", "hyper", "hyper_util", "reqwest", "sqlx"];

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line logs.
    Compact,

    /// One JSON object per event.
    Json,
}

/// Logging and request-tracing settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default level for marketplace targets (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Colour compact output
    #[arg(long, env = "LOG_ANSI", action = ArgAction::Set, default_value_t = true)]
    pub log_ansi: bool,

    /// Requests slower than this many milliseconds are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

impl LoggingConfig {
    /// Filter directives used when `RUST_LOG` is not set in the environment.
    #[must_use]
    pub fn default_directives(&self) -> String {
        QUIET_TARGETS
            .iter()
            .fold(self.log_level.clone(), |directives, target| {
                format!("{directives},{target}=warn")
            })
    }
}
