//! Prometheus metrics for Swaggy.
//!
//! Metrics are recorded through the `metrics` facade. Until a recorder is
//! installed every call is a no-op, so libraries can record freely.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `swaggy_route_matches_total` | Counter | `outcome` | Matching outcomes |
//! | `swaggy_match_duration_seconds` | Histogram | `outcome` | Time spent matching |
//! | `swaggy_responses_total` | Counter | `status` | Resolved response statuses |
//! | `swaggy_routes_loaded` | Gauge | - | Entries in the active route table |

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

/// Counter of matching outcomes.
pub const ROUTE_MATCHES_TOTAL: &str = "swaggy_route_matches_total";
/// Histogram of matching latency.
pub const MATCH_DURATION_SECONDS: &str = "swaggy_match_duration_seconds";
/// Counter of resolved response statuses.
pub const RESPONSES_TOTAL: &str = "swaggy_responses_total";
/// Gauge of loaded route entries.
pub const ROUTES_LOADED: &str = "swaggy_routes_loaded";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus recorder.
    pub enabled: bool,
}

/// Label value for a matching outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// Path and method matched.
    Matched,
    /// No template accepted the path.
    NoPath,
    /// The path matched under other methods only.
    MethodMismatch,
}

impl MatchOutcome {
    /// Returns the label value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NoPath => "no_path",
            Self::MethodMismatch => "method_mismatch",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders metrics collected by an installed recorder.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    handle: PrometheusHandle,
}

impl MetricsRegistry {
    /// Wraps an installed recorder's handle.
    #[must_use]
    pub fn new(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Renders all metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the Prometheus recorder.
///
/// No HTTP listener is started; use [`MetricsRegistry::render`] to export.
/// Returns `None` when metrics are disabled. Calling this again after a
/// successful install returns the existing registry.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if another recorder is installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<Option<MetricsRegistry>> {
    if !config.enabled {
        return Ok(None);
    }

    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(Some(MetricsRegistry::new(handle.clone())));
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let handle = METRICS_HANDLE.get_or_init(|| handle).clone();
    register_metric_descriptions();

    Ok(Some(MetricsRegistry::new(handle)))
}

/// Renders metrics in Prometheus format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(ROUTE_MATCHES_TOTAL, "Requests matched against the route table, by outcome");
    describe_histogram!(MATCH_DURATION_SECONDS, "Time spent matching a request, in seconds");
    describe_counter!(RESPONSES_TOTAL, "Responses resolved, by status code");
    describe_gauge!(ROUTES_LOADED, "Route entries in the most recently loaded table");
}

/// Records one matching outcome and how long it took.
pub fn record_match(outcome: MatchOutcome, duration: Duration) {
    counter!(ROUTE_MATCHES_TOTAL, "outcome" => outcome.as_str()).increment(1);
    histogram!(MATCH_DURATION_SECONDS, "outcome" => outcome.as_str())
        .record(duration.as_secs_f64());
}

/// Records the status of a resolved response.
pub fn record_response(status: u16) {
    counter!(RESPONSES_TOTAL, "status" => status.to_string()).increment(1);
}

/// Records the size of a freshly loaded route table.
#[allow(clippy::cast_precision_loss)]
pub fn record_routes_loaded(count: usize) {
    gauge!(ROUTES_LOADED).set(count as f64);
}
