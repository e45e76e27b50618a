//! Subcommand implementations.
//!
//! Commands write to any [`Write`] so they can be exercised without a
//! terminal. Logs never go to the same stream: they are on stderr.

use std::io::{self, Write};

use anyhow::Context;
use swaggy::{MethodMismatchPolicy, RouteRequest, Router, RouterConfig};
use swaggy_config::{ConfigLoader, LogFormat, SwaggyConfig, TelemetrySection};
use swaggy_telemetry::{LogConfig, MetricsConfig, TelemetryConfig};

use crate::cli::Cli;

/// Prefix for `SWAGGY__SECTION__KEY` overrides.
const ENV_PREFIX: &str = "SWAGGY";

/// Loads configuration and applies command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<SwaggyConfig> {
    let mut loader = ConfigLoader::new().with_dotenv()?;
    if let Some(path) = &cli.config {
        loader = loader
            .with_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    let mut config = loader.with_env_prefix(ENV_PREFIX).load()?;

    if let Some(spec) = &cli.command.spec().spec {
        config.router.spec_path = Some(spec.clone());
    }
    if cli.method_not_allowed {
        config.router.method_mismatch = MethodMismatchPolicy::MethodNotAllowed;
    }
    if cli.metrics {
        config.telemetry.metrics.enabled = true;
    }
    Ok(config)
}

/// Maps the configuration file's telemetry section onto telemetry settings.
pub fn telemetry_config(section: &TelemetrySection) -> TelemetryConfig {
    let logging = LogConfig {
        enabled: section.logging.enabled,
        level: section.logging.level.clone(),
        json_format: section.logging.format == LogFormat::Json,
        file_line_info: section.logging.include_location,
        ansi: section.logging.ansi_enabled,
    };

    TelemetryConfig::new(section.service_name.as_str())
        .with_environment(section.environment.as_str())
        .with_logging(logging)
        .with_metrics(MetricsConfig {
            enabled: section.metrics.enabled,
        })
}

/// Builds the router named by configuration.
pub fn build_router(config: &RouterConfig) -> anyhow::Result<Router> {
    if config.spec_path.is_none() {
        anyhow::bail!("no specification document: pass --spec or set router.spec_path");
    }
    let router = Router::from_config(config)?;
    Ok(router)
}

/// Prints `METHOD TEMPLATE operationId` for every route.
pub fn routes(router: &Router, out: &mut impl Write) -> io::Result<()> {
    for entry in router.table().entries() {
        writeln!(
            out,
            "{} {} {}",
            entry.method(),
            entry.template(),
            entry.operation().operation_id().unwrap_or("-")
        )?;
    }
    Ok(())
}

/// Resolves one request and prints status line, headers, and body.
///
/// Returns whether the response was a success.
pub fn match_request(
    router: &Router,
    method: &str,
    target: &str,
    out: &mut impl Write,
) -> io::Result<bool> {
    let response = router.handle(&RouteRequest::from_target(method, target));

    writeln!(out, "{}", response.status)?;
    for (name, value) in &response.headers {
        writeln!(out, "{name}: {}", String::from_utf8_lossy(value.as_bytes()))?;
    }
    writeln!(out)?;
    out.write_all(&response.body)?;
    writeln!(out)?;

    Ok(response.is_success())
}

/// Appends rendered metrics after the command output, if any were recorded.
pub fn write_metrics(rendered: Option<&str>, out: &mut impl Write) -> io::Result<()> {
    if let Some(text) = rendered {
        writeln!(out)?;
        out.write_all(text.as_bytes())?;
    }
    Ok(())
}
