//! Observability for Swaggy: structured logging and Prometheus metrics.
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, JSON or pretty
//!   output on stderr
//! - **Metrics**: the `metrics` facade backed by a Prometheus recorder,
//!   rendered on demand
//!
//! # Example
//!
//! ```rust,ignore
//! use swaggy_telemetry::{init_telemetry, LogConfig, TelemetryConfig};
//!
//! let config = TelemetryConfig::new("customers-api").with_logging(LogConfig::development());
//!
//! let telemetry = init_telemetry(&config)?;
//! // ...
//! if let Some(text) = telemetry.render_metrics() {
//!     println!("{text}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use crate::config::TelemetryConfig;
pub use crate::error::TelemetryError;
pub use crate::logging::{init_logging, LogConfig};
pub use crate::metrics::{init_metrics, MatchOutcome, MetricsConfig, MetricsRegistry};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Handle to initialized telemetry.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    metrics: Option<MetricsRegistry>,
}

impl Telemetry {
    /// Returns the metrics registry if metrics are enabled.
    pub fn metrics(&self) -> Option<&MetricsRegistry> {
        self.metrics.as_ref()
    }

    /// Renders metrics in Prometheus text format, if enabled.
    pub fn render_metrics(&self) -> Option<String> {
        self.metrics.as_ref().map(MetricsRegistry::render)
    }
}

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<Telemetry> {
    init_logging(&config.logging)?;
    let metrics = init_metrics(&config.metrics)?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        metrics = metrics.is_some(),
        "telemetry initialized"
    );

    Ok(Telemetry { metrics })
}
