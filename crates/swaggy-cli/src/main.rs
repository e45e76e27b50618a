//! Swaggy command-line entry point.

mod cli;
mod commands;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use swaggy_telemetry::{init_telemetry, Telemetry};
use tracing::{debug, error};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match commands::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("swaggy: invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let telemetry = match init_telemetry(&commands::telemetry_config(&config.telemetry)) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("swaggy: failed to initialize telemetry: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config.router, &telemetry) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "command failed");
            eprintln!("swaggy: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    cli: &Cli,
    config: &swaggy::RouterConfig,
    telemetry: &Telemetry,
) -> anyhow::Result<ExitCode> {
    let router = commands::build_router(config)?;
    debug!(routes = router.table().len(), "router ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match &cli.command {
        Command::Routes(_) => {
            commands::routes(&router, &mut out)?;
            ExitCode::SUCCESS
        }
        Command::Match { method, path, .. } => {
            if commands::match_request(&router, method, path, &mut out)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };
    commands::write_metrics(telemetry.render_metrics().as_deref(), &mut out)?;
    out.flush()?;
    Ok(code)
}
