//! Shared domain types.
//!
//! These are plain values: they are built by one stage of the pipeline and
//! consumed by the next, and serialize cleanly for the JSON report.

use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_DOMAINS: [&str; 8] = [
    "documentize",
    "sheetize",
    "barcodize",
    "ocrize",
    "imagise",
    "slidize",
    "psdize",
    "smallize",
];

pub const DEFAULT_SUBDOMAINS: [&str; 7] = [
    "brands",
    "products",
    "blog",
    "docs",
    "reference",
    "releases",
    "www",
];

pub const DEFAULT_TLDS: [&str; 1] = ["com"];

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Which sites to probe and how long to wait for each sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub domains: Vec<String>,
    pub subdomains: Vec<String>,
    pub tlds: Vec<String>,
    pub fetch_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            domains: DEFAULT_DOMAINS.iter().map(|s| s.to_string()).collect(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            tlds: DEFAULT_TLDS.iter().map(|s| s.to_string()).collect(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// One `(subdomain, domain, tld)` combination to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub subdomain: String,
    pub domain: String,
    pub tld: String,
}

impl Candidate {
    pub fn new(subdomain: impl Into<String>, domain: impl Into<String>, tld: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            domain: domain.into(),
            tld: tld.into(),
        }
    }

    /// `https://{subdomain}.{domain}.{tld}`
    pub fn site_url(&self) -> String {
        format!("https://{}.{}.{}", self.subdomain, self.domain, self.tld)
    }

    /// `https://{subdomain}.{domain}.{tld}/sitemap.xml`
    pub fn sitemap_url(&self) -> String {
        format!("{}/sitemap.xml", self.site_url())
    }
}

/// A sitemap confirmed reachable, paired with the site it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub site_url: String,
    pub sitemap_url: String,
}

impl SitemapEntry {
    pub fn new(site_url: impl Into<String>, sitemap_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            sitemap_url: sitemap_url.into(),
        }
    }
}

/// Result of classifying a fetched sitemap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapKind {
    /// A sitemap index; holds the child sitemap URLs in document order.
    Index(Vec<String>),
    Leaf,
}

/// Whether the gate submits or only reports what it would submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Submit,
    DryRun,
}

/// What the submission gate did for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    AlreadySubmitted,
    Submitted,
    WouldSubmit,
}

/// An entry whose submission failed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    #[serde(flatten)]
    pub entry: SitemapEntry,
    pub error: String,
}

/// Per-entry result recorded in the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    #[serde(flatten)]
    pub entry: SitemapEntry,
    pub outcome: SubmitOutcome,
}

/// Everything a single run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    pub processed: Vec<EntryReport>,
    pub failed: Vec<FailedEntry>,
}

impl RunSummary {
    pub fn count(&self, outcome: SubmitOutcome) -> usize {
        self.processed.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Number of sitemaps the locator produced.
    pub fn discovered(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}
