//! Top-level configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, MethodMismatchPolicy, RouterConfig, TelemetrySection};

/// Complete Swaggy configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use swaggy_config::SwaggyConfig;
///
/// let config = SwaggyConfig::default();
/// assert_eq!(config.router.placeholder_body, "OK");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct SwaggyConfig {
    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,

    /// Telemetry configuration (logging, metrics).
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl SwaggyConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `router.spec_path` is set but empty
    /// - `telemetry.service_name` is empty
    /// - `telemetry.logging.level` is empty while logging is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .router
            .spec_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid {
                field: "router.spec_path",
                reason: "must not be empty",
            });
        }

        if self.telemetry.service_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "telemetry.service_name",
                reason: "must not be empty",
            });
        }

        if self.telemetry.logging.enabled && self.telemetry.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "telemetry.logging.level",
                reason: "must not be empty when logging is enabled",
            });
        }

        Ok(())
    }

    /// Development preset: pretty debug logs, 404 on method mismatch.
    ///
    /// # Example
    ///
    /// ```
    /// use swaggy_config::SwaggyConfig;
    ///
    /// let config = SwaggyConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.ansi_enabled = true;
        config.telemetry.logging.include_location = true;
        config.telemetry.environment = "development".to_string();

        config
    }

    /// Production preset: JSON logs, metrics on, 405 on method mismatch.
    ///
    /// # Example
    ///
    /// ```
    /// use swaggy_config::{MethodMismatchPolicy, SwaggyConfig};
    ///
    /// let config = SwaggyConfig::production();
    /// assert_eq!(config.router.method_mismatch, MethodMismatchPolicy::MethodNotAllowed);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.router.method_mismatch = MethodMismatchPolicy::MethodNotAllowed;

        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = LogFormat::Json;
        config.telemetry.logging.ansi_enabled = false;
        config.telemetry.environment = "production".to_string();
        config.telemetry.metrics.enabled = true;

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = SwaggyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.telemetry.service_name, "swaggy");
    }

    #[test]
    fn test_development_preset() {
        let config = SwaggyConfig::development();
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
        assert_eq!(config.router.method_mismatch, MethodMismatchPolicy::NotFound);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_preset() {
        let config = SwaggyConfig::production();
        assert_eq!(config.telemetry.logging.format, LogFormat::Json);
        assert!(config.telemetry.metrics.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_spec_path() {
        let mut config = SwaggyConfig::default();
        config.router.spec_path = Some(PathBuf::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("router.spec_path"));
    }

    #[test]
    fn test_validate_empty_service_name() {
        let mut config = SwaggyConfig::default();
        config.telemetry.service_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_level_only_matters_when_enabled() {
        let mut config = SwaggyConfig::default();
        config.telemetry.logging.level = String::new();
        assert!(config.validate().is_err());

        config.telemetry.logging.enabled = false;
        assert!(config.validate().is_ok());
    }
}
