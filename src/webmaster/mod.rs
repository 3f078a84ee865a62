//! Webmaster API integration.
//!
//! `WebmasterApi` is the seam the submission gate talks to. The production
//! implementation is `SearchConsoleClient`; tests use an in-memory double.

use serde::Deserialize;

use crate::error::SitemapError;

pub mod auth;
pub mod credentials;
pub mod search_console;

pub use auth::{TokenSource, WEBMASTERS_SCOPE};
pub use credentials::{CREDENTIALS_ENV, ServiceAccountKey};
pub use search_console::SearchConsoleClient;

/// One sitemap as reported by the list operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedSitemap {
    #[serde(default)]
    pub path: String,
    pub last_submitted: Option<String>,
    pub is_pending: Option<bool>,
    pub is_sitemaps_index: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Counts are int64 and arrive as JSON strings.
    pub warnings: Option<String>,
    pub errors: Option<String>,
}

#[cfg(test)]
impl SubmittedSitemap {
    pub fn with_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }
}

/// The two webmaster operations the gate needs.
pub trait WebmasterApi {
    /// Sitemaps already submitted for `site_url`.
    fn list_sitemaps(&self, site_url: &str) -> Result<Vec<SubmittedSitemap>, SitemapError>;

    /// Register `sitemap_url` for crawling under `site_url`.
    fn submit_sitemap(&self, site_url: &str, sitemap_url: &str) -> Result<(), SitemapError>;
}
