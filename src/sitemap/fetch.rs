//! Fetching candidate sitemap documents.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::SitemapError;

const USER_AGENT: &str = concat!("sitemap-submit/", env!("CARGO_PKG_VERSION"));

/// Source of sitemap documents.
///
/// Implementations return the body only for an HTTP 200 response; any other
/// status and any transport failure is a `SitemapError::Network`.
pub trait SitemapFetcher {
    fn fetch(&self, url: &str) -> Result<String, SitemapError>;
}

/// Blocking HTTP fetcher with a per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SitemapError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SitemapError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl SitemapFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, SitemapError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| SitemapError::Network(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(SitemapError::Network(format!("{url} returned HTTP {status}")));
        }

        resp.text()
            .map_err(|e| SitemapError::Network(format!("failed to read body of {url}: {e}")))
    }
}
