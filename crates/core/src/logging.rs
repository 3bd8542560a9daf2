//! Structured logging setup.
//!
//! The level comes from `RUST_LOG` (default `info`); the output format from
//! `TONDNS_LOG_FORMAT` (`json` or anything else for human-readable text).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "TONDNS_LOG_FORMAT";

/// Output format of the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event, for log aggregation
    Json,
}

impl LogFormat {
    /// Read the format from [`LOG_FORMAT_ENV`].
    pub fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_ENV) {
            Ok(value) => Self::parse(&value),
            Err(_) => LogFormat::Pretty,
        }
    }

    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging with the format chosen by the environment.
///
/// # Example
/// ```no_run
/// use tondns_core::logging;
///
/// logging::init();
/// tracing::info!("DNS manager started");
/// ```
pub fn init() {
    init_with(LogFormat::from_env());
}

/// Initialize logging with JSON output.
pub fn init_json() {
    init_with(LogFormat::Json);
}

/// Initialize logging with an explicit format.
///
/// Does nothing if a global subscriber is already installed, so tests and
/// embedding hosts may call it more than once.
pub fn init_with(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter());
    let result = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
