//! Configuration schema types.
//!
//! This module defines the structure of every configuration section.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to answer when a path matches but the method does not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MethodMismatchPolicy {
    /// Answer `404 Not Found`, as for an unknown path.
    #[default]
    NotFound,
    /// Answer `405 Method Not Allowed` with an `Allow` header.
    MethodNotAllowed,
}

impl MethodMismatchPolicy {
    /// Returns the configuration spelling of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
        }
    }
}

impl fmt::Display for MethodMismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodMismatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "not_found" | "404" => Ok(Self::NotFound),
            "method_not_allowed" | "405" => Ok(Self::MethodNotAllowed),
            other => Err(format!(
                "unknown method mismatch policy `{other}`, expected 'not_found' or 'method_not_allowed'"
            )),
        }
    }
}

/// Router configuration section.
///
/// # Example
///
/// ```
/// use swaggy_config::{MethodMismatchPolicy, RouterConfig};
///
/// let config = RouterConfig {
///     spec_path: Some("openapi.yaml".into()),
///     method_mismatch: MethodMismatchPolicy::MethodNotAllowed,
///     ..Default::default()
/// };
/// assert_eq!(config.placeholder_body, "OK");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Specification document to load (JSON or YAML).
    #[serde(default)]
    pub spec_path: Option<PathBuf>,

    /// Response policy for a path that matches under other methods only.
    #[serde(default)]
    pub method_mismatch: MethodMismatchPolicy,

    /// Body returned for matched operations that have no summary.
    #[serde(default = "default_placeholder_body")]
    pub placeholder_body: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            spec_path: None,
            method_mismatch: MethodMismatchPolicy::default(),
            placeholder_body: default_placeholder_body(),
        }
    }
}

fn default_placeholder_body() -> String {
    "OK".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (`info`, `swaggy_router=trace`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics configuration.
///
/// Metrics are collected in-process and rendered on demand in the
/// Prometheus text format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder.
    #[serde(default)]
    pub enabled: bool,
}

/// Telemetry configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Service name attached to log output.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Deployment environment (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            environment: default_environment(),
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

fn default_service_name() -> String {
    "swaggy".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_config_default() {
        let config = RouterConfig::default();
        assert!(config.spec_path.is_none());
        assert_eq!(config.method_mismatch, MethodMismatchPolicy::NotFound);
        assert_eq!(config.placeholder_body, "OK");
    }

    #[test]
    fn test_router_config_deserialize() {
        let config: RouterConfig = toml::from_str(
            r#"
            spec_path = "api/openapi.yaml"
            method_mismatch = "method_not_allowed"
            "#,
        )
        .unwrap();
        assert_eq!(config.spec_path, Some(PathBuf::from("api/openapi.yaml")));
        assert_eq!(config.method_mismatch, MethodMismatchPolicy::MethodNotAllowed);
        assert_eq!(config.placeholder_body, "OK");
    }

    #[test]
    fn test_router_config_unknown_field_rejected() {
        let result: Result<RouterConfig, _> = toml::from_str(r#"spec = "openapi.yaml""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_from_str() {
        let parse = |s: &str| s.parse::<MethodMismatchPolicy>();
        assert_eq!(parse("not_found"), Ok(MethodMismatchPolicy::NotFound));
        assert_eq!(parse("405"), Ok(MethodMismatchPolicy::MethodNotAllowed));
        assert_eq!(parse("Method_Not_Allowed"), Ok(MethodMismatchPolicy::MethodNotAllowed));
        assert!("teapot".parse::<MethodMismatchPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [MethodMismatchPolicy::NotFound, MethodMismatchPolicy::MethodNotAllowed] {
            assert_eq!(policy.to_string().parse::<MethodMismatchPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_deserialize() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_telemetry_section_default() {
        let config = TelemetrySection::default();
        assert_eq!(config.service_name, "swaggy");
        assert!(!config.metrics.enabled);
    }
}
