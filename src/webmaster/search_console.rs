//! Google Search Console sitemaps API (webmasters v3 resource paths).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::error::SitemapError;
use crate::webmaster::auth::{TokenSource, WEBMASTERS_SCOPE};
use crate::webmaster::credentials::ServiceAccountKey;
use crate::webmaster::{SubmittedSitemap, WebmasterApi};

const BASE_URL: &str = "https://searchconsole.googleapis.com/webmasters/v3";
const USER_AGENT: &str = concat!("sitemap-submit/", env!("CARGO_PKG_VERSION"));

/// Everything except RFC 3986 unreserved characters, so `:` and `/` are escaped too.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

pub struct SearchConsoleClient {
    client: Client,
    base_url: String,
    tokens: TokenSource,
}

impl SearchConsoleClient {
    /// Build an authenticated client. The key is validated here; the first
    /// access token is requested lazily by the first API call.
    pub fn new(key: &ServiceAccountKey) -> Result<Self, SitemapError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SitemapError::Config(format!("Failed to build HTTP client: {e}")))?;
        let tokens = TokenSource::new(client.clone(), key, WEBMASTERS_SCOPE)?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            tokens,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    fn sitemaps_endpoint(&self, site_url: &str) -> String {
        format!("{}/sites/{}/sitemaps", self.base_url, encode_segment(site_url))
    }

    fn sitemap_endpoint(&self, site_url: &str, sitemap_url: &str) -> String {
        format!(
            "{}/{}",
            self.sitemaps_endpoint(site_url),
            encode_segment(sitemap_url)
        )
    }
}

impl WebmasterApi for SearchConsoleClient {
    fn list_sitemaps(&self, site_url: &str) -> Result<Vec<SubmittedSitemap>, SitemapError> {
        let token = self.tokens.access_token()?;
        let url = self.sitemaps_endpoint(site_url);
        debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(|e| SitemapError::Api(format!("list sitemaps request failed: {e}")))?;
        let resp = check_status(resp, "list sitemaps")?;

        let body: SitemapsListResponse = resp
            .json()
            .map_err(|e| SitemapError::Api(format!("Failed to parse list sitemaps response: {e}")))?;
        Ok(body.sitemap)
    }

    fn submit_sitemap(&self, site_url: &str, sitemap_url: &str) -> Result<(), SitemapError> {
        let token = self.tokens.access_token()?;
        let url = self.sitemap_endpoint(site_url, sitemap_url);
        debug!("PUT {url}");

        let resp = self
            .client
            .put(&url)
            .bearer_auth(token)
            .body("")
            .send()
            .map_err(|e| SitemapError::Api(format!("submit sitemap request failed: {e}")))?;
        check_status(resp, "submit sitemap")?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SitemapsListResponse {
    #[serde(default)]
    sitemap: Vec<SubmittedSitemap>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn check_status(resp: Response, operation: &str) -> Result<Response, SitemapError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(api_error(operation, status.as_u16(), &body))
}

/// Prefer Google's `error.message`; fall back to the raw body.
fn api_error(operation: &str, status: u16, body: &str) -> SitemapError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if detail.is_empty() {
        SitemapError::Api(format!("{operation} returned HTTP {status}"))
    } else {
        SitemapError::Api(format!("{operation} returned HTTP {status}: {detail}"))
    }
}

/// Percent-encode a whole URL so it fits in a single path segment.
fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}
