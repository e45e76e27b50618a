//! Errors raised while assembling a [`SwaggyConfig`](crate::SwaggyConfig).

use std::path::PathBuf;

use thiserror::Error;

/// Why configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The named configuration file does not exist.
    #[error("configuration file {} does not exist", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("cannot read configuration file {}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Neither TOML nor JSON.
    #[error("unsupported configuration format `{format}`, expected toml or json")]
    UnsupportedFormat {
        /// The extension or format name that was given.
        format: String,
    },

    /// Malformed TOML, or TOML with unknown keys.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON, or JSON with unknown keys.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.env` file exists but could not be parsed.
    #[error("invalid .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// An environment override has an unusable value.
    #[error("environment variable {var}: {reason}")]
    Env {
        /// Full variable name.
        var: String,
        /// What was expected.
        reason: String,
    },

    /// A loaded value fails validation.
    #[error("{field} {reason}")]
    Invalid {
        /// Dotted path of the offending field, e.g. `router.spec_path`.
        field: &'static str,
        /// The violated rule.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn unsupported(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub(crate) fn env(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Env {
            var: var.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/etc/swaggy/swaggy.toml"),
        };
        assert_eq!(
            err.to_string(),
            "configuration file /etc/swaggy/swaggy.toml does not exist"
        );

        let err = ConfigError::env("SWAGGY__ROUTER__METHOD_MISMATCH", "expected 404 or 405");
        assert_eq!(
            err.to_string(),
            "environment variable SWAGGY__ROUTER__METHOD_MISMATCH: expected 404 or 405"
        );

        let err = ConfigError::Invalid {
            field: "router.spec_path",
            reason: "must not be empty",
        };
        assert_eq!(err.to_string(), "router.spec_path must not be empty");
    }

    #[test]
    fn test_unsupported_format() {
        assert_eq!(
            ConfigError::unsupported("ini").to_string(),
            "unsupported configuration format `ini`, expected toml or json"
        );
    }
}
