//! Command-line parsing for the sitemap submitter.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! discovery and submission.

use clap::{Args, Parser, Subcommand};

use crate::domain::DEFAULT_FETCH_TIMEOUT;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "sitemap-submit",
    version,
    about = "Discover sitemaps and submit new ones to Google Search Console"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover sitemaps and submit the ones Search Console does not list yet.
    ///
    /// Requires a service-account key in GOOGLE_CREDENTIALS_JSON.
    Run(RunArgs),
    /// Discover sitemaps and print them (no credentials needed).
    Discover(TargetArgs),
}

/// Which sites to probe and how to print the result.
#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    /// Registered domain name without TLD (repeatable; replaces the built-in list).
    #[arg(long = "domain", value_name = "NAME", value_delimiter = ',')]
    pub domains: Vec<String>,

    /// Subdomain prefix (repeatable; replaces the built-in list).
    #[arg(long = "subdomain", value_name = "NAME", value_delimiter = ',')]
    pub subdomains: Vec<String>,

    /// Top-level domain (repeatable; replaces the built-in list).
    #[arg(long = "tld", value_name = "TLD", value_delimiter = ',')]
    pub tlds: Vec<String>,

    /// Timeout for each sitemap fetch, in seconds.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Options for `run`.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Check submission status but do not submit anything.
    #[arg(long)]
    pub dry_run: bool,
}
