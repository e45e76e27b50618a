//! Combined telemetry settings.

use crate::logging::LogConfig;
use crate::metrics::MetricsConfig;

/// Logging and metrics settings for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Name reported when telemetry starts.
    pub service_name: String,
    /// Deployment environment, e.g. `staging`.
    pub environment: String,
    /// Log output.
    pub logging: LogConfig,
    /// Prometheus recorder.
    pub metrics: MetricsConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::new("swaggy")
    }
}

impl TelemetryConfig {
    /// Default logging, metrics off, `development` environment.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            environment: "development".to_string(),
            logging: LogConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    /// Sets the environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Replaces the logging settings.
    #[must_use]
    pub fn with_logging(mut self, logging: LogConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Replaces the metrics settings.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "swaggy");
        assert_eq!(config.environment, "development");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_setters() {
        let config = TelemetryConfig::new("customers-api")
            .with_environment("staging")
            .with_logging(LogConfig::development())
            .with_metrics(MetricsConfig { enabled: true });

        assert_eq!(config.service_name, "customers-api");
        assert_eq!(config.environment, "staging");
        assert!(config.metrics.enabled);
        assert!(!config.logging.json_format);
    }
}
