//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads credentials and builds the HTTP fetcher and API client
//! - runs the discovery/submission pipeline
//! - prints the summary

use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, RunArgs, TargetArgs};
use crate::domain::{DiscoveryConfig, SubmitMode};
use crate::error::AppError;
use crate::sitemap::HttpFetcher;
use crate::webmaster::{SearchConsoleClient, ServiceAccountKey};

pub mod pipeline;

/// Entry point for the `sitemap-submit` binary.
pub fn run() -> Result<(), AppError> {
    // `sitemap-submit` with no subcommand behaves like `sitemap-submit run`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::telemetry::init();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Discover(args) => handle_discover(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = discovery_config_from_args(&args.target);
    let mode = if args.dry_run {
        SubmitMode::DryRun
    } else {
        SubmitMode::Submit
    };

    let key = ServiceAccountKey::from_env()?;
    let api = SearchConsoleClient::new(&key)?;
    info!("Authenticated as {}", key.client_email);

    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let summary = pipeline::run_submission(&config, &fetcher, &api, mode);

    if args.target.json {
        println!("{}", to_json(&summary)?);
    } else {
        println!("{}", crate::report::format_run_summary(&summary));
    }
    Ok(())
}

fn handle_discover(args: TargetArgs) -> Result<(), AppError> {
    let config = discovery_config_from_args(&args);
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let found = pipeline::discover(&config, &fetcher);

    if args.json {
        println!("{}", to_json(&found)?);
    } else {
        println!("{}", crate::report::format_discovered(&found));
    }
    Ok(())
}

/// Empty lists on the command line fall back to the built-in defaults.
pub fn discovery_config_from_args(args: &TargetArgs) -> DiscoveryConfig {
    let defaults = DiscoveryConfig::default();
    let or_default = |given: &[String], fallback: Vec<String>| {
        if given.is_empty() {
            fallback
        } else {
            given.to_vec()
        }
    };

    DiscoveryConfig {
        domains: or_default(&args.domains, defaults.domains),
        subdomains: or_default(&args.subdomains, defaults.subdomains),
        tlds: or_default(&args.tlds, defaults.tlds),
        fetch_timeout: Duration::from_secs(args.timeout_secs),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize report: {e}")))
}

/// Rewrite argv so `sitemap-submit` defaults to `sitemap-submit run`.
///
/// Rules:
/// - `sitemap-submit`                      -> `sitemap-submit run`
/// - `sitemap-submit --dry-run ...`        -> `sitemap-submit run --dry-run ...`
/// - `sitemap-submit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "discover");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}
