//! Structured logging on stderr.
//!
//! Stdout is left to command output. The filter accepts `EnvFilter`
//! directives, so `swaggy_router=trace,info` traces every match while
//! keeping the rest at info.
//!
//! ```rust,ignore
//! use swaggy_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(routes = 12, "route table built");
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// How log events are filtered and formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a subscriber at all.
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `info` or `swaggy_router=trace,warn`.
    pub level: String,
    /// One JSON object per event; otherwise multi-line pretty output.
    pub json_format: bool,
    /// Attach source file and line to each event.
    pub file_line_info: bool,
    /// Colour the pretty output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            file_line_info: false,
            ansi: false,
        }
    }
}

impl LogConfig {
    /// Coloured pretty output at debug, with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            file_line_info: true,
            ansi: true,
            ..Self::default()
        }
    }

    /// JSON at info.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

/// Installs the global subscriber described by `config`.
///
/// A disabled config installs nothing.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` for a bad filter directive or
/// when a global subscriber already exists.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    let json = config.json_format.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
    });
    let pretty = (!config.json_format).then(|| {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses an `EnvFilter` directive.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the directive does not parse.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| TelemetryError::LoggingInit(format!("invalid filter `{directive}`: {e}")))
}
