//! The discover → classify → submit loop shared by the `run` and `discover` commands.
//!
//! Subdomains are processed one at a time, in configured order. Each pass
//! probes `domains × [subdomain] × tlds`, then sends every sitemap found
//! through the submission gate. Failures are per entry; the loop always moves
//! on to the next subdomain.

use std::slice;

use tracing::{error, info};

use crate::domain::{DiscoveryConfig, EntryReport, FailedEntry, RunSummary, SitemapEntry, SubmitMode};
use crate::sitemap::{SitemapFetcher, candidates, locate_sitemaps};
use crate::submit::submit_if_absent;
use crate::webmaster::WebmasterApi;

/// Discover sitemaps for every configured site without touching the webmaster API.
pub fn discover<F>(config: &DiscoveryConfig, fetcher: &F) -> Vec<SitemapEntry>
where
    F: SitemapFetcher + ?Sized,
{
    let mut found = Vec::new();
    for subdomain in &config.subdomains {
        found.extend(discover_subdomain(config, fetcher, subdomain));
    }
    found
}

/// Discover sitemaps and submit the ones the webmaster API does not list yet.
pub fn run_submission<F, A>(config: &DiscoveryConfig, fetcher: &F, api: &A, mode: SubmitMode) -> RunSummary
where
    F: SitemapFetcher + ?Sized,
    A: WebmasterApi + ?Sized,
{
    let mut summary = RunSummary {
        dry_run: mode == SubmitMode::DryRun,
        ..RunSummary::default()
    };

    for subdomain in &config.subdomains {
        for entry in discover_subdomain(config, fetcher, subdomain) {
            match submit_if_absent(api, &entry, mode) {
                Ok(outcome) => summary.processed.push(EntryReport { entry, outcome }),
                Err(e) => {
                    error!("Failed to submit sitemap: {}: {e}", entry.sitemap_url);
                    summary.failed.push(FailedEntry {
                        entry,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    summary
}

fn discover_subdomain<F>(config: &DiscoveryConfig, fetcher: &F, subdomain: &String) -> Vec<SitemapEntry>
where
    F: SitemapFetcher + ?Sized,
{
    info!("Processing subdomain '{subdomain}'");
    let subdomains = slice::from_ref(subdomain);
    locate_sitemaps(fetcher, candidates(&config.domains, subdomains, &config.tlds))
}
