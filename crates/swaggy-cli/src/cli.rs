//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Route HTTP requests by an OpenAPI or Swagger document.
#[derive(Debug, Parser)]
#[command(name = "swaggy", version, about)]
pub struct Cli {
    /// Configuration file (TOML or JSON).
    #[arg(short, long, global = true, env = "SWAGGY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Answer method mismatches with 405 and an `Allow` header.
    #[arg(long, global = true)]
    pub method_not_allowed: bool,

    /// Record metrics and print them in Prometheus text format afterwards.
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every route in registration order.
    Routes(SpecArgs),

    /// Resolve one request and print the response.
    Match {
        #[command(flatten)]
        spec: SpecArgs,

        /// Request method, e.g. GET.
        method: String,

        /// Request target, e.g. /customers/123/stuff?full=1.
        path: String,
    },
}

impl Command {
    pub fn spec(&self) -> &SpecArgs {
        match self {
            Self::Routes(spec) | Self::Match { spec, .. } => spec,
        }
    }
}

#[derive(Debug, Args)]
pub struct SpecArgs {
    /// Specification document (JSON or YAML). Overrides `router.spec_path`.
    #[arg(short, long)]
    pub spec: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match() {
        let cli = Cli::try_parse_from([
            "swaggy",
            "--method-not-allowed",
            "match",
            "--spec",
            "api.yaml",
            "POST",
            "/customers/1",
        ])
        .unwrap();

        assert!(cli.method_not_allowed);
        assert_eq!(cli.command.spec().spec, Some(PathBuf::from("api.yaml")));
        let Command::Match { method, path, .. } = cli.command else {
            panic!("expected match");
        };
        assert_eq!(method, "POST");
        assert_eq!(path, "/customers/1");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["swaggy", "routes", "-s", "a.json", "-c", "swaggy.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("swaggy.toml")));
        assert!(!cli.metrics);
        assert!(matches!(cli.command, Command::Routes(_)));
    }

    #[test]
    fn test_match_requires_path() {
        assert!(Cli::try_parse_from(["swaggy", "match", "GET"]).is_err());
    }
}
