//! Typed configuration for Swaggy.
//!
//! Configuration is layered, later layers overriding earlier ones:
//! defaults, then a TOML or JSON file, then `PREFIX__SECTION__KEY`
//! environment variables. Unknown fields are rejected.
//!
//! # Example
//!
//! ```no_run
//! use swaggy_config::ConfigLoader;
//!
//! # fn main() -> Result<(), swaggy_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("swaggy.toml")?
//!     .with_env_prefix("SWAGGY")
//!     .load()?;
//!
//! println!("serving {:?}", config.router.spec_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! spec_path = "openapi.yaml"
//! method_mismatch = "method_not_allowed"
//! placeholder_body = "OK"
//!
//! [telemetry]
//! service_name = "customers-api"
//! environment = "production"
//!
//! [telemetry.logging]
//! level = "info"
//! format = "json"
//!
//! [telemetry.metrics]
//! enabled = true
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `SWAGGY__ROUTER__SPEC_PATH=/etc/api/openapi.yaml`
//! - `SWAGGY__ROUTER__METHOD_MISMATCH=method_not_allowed`
//! - `SWAGGY__TELEMETRY__LOGGING__LEVEL=debug`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::SwaggyConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    LogFormat, LoggingConfig, MethodMismatchPolicy, MetricsConfig, RouterConfig, TelemetrySection,
};
