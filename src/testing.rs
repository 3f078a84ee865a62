//! In-memory fetcher and webmaster API for tests, plus a local HTTP stub.

use std::cell::RefCell;
use std::collections::HashMap;

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

use crate::error::SitemapError;
use crate::sitemap::SitemapFetcher;
use crate::webmaster::{SubmittedSitemap, WebmasterApi};

/// Serves fixed bodies for known URLs; everything else is a network error.
#[derive(Debug, Default)]
pub struct MockFetcher {
    bodies: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl SitemapFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, SitemapError> {
        self.requested.borrow_mut().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| SitemapError::Network(format!("{url} returned HTTP 404 Not Found")))
    }
}

/// Records submissions; optionally fails listing or submitting.
#[derive(Debug, Default)]
pub struct MockWebmaster {
    submitted: RefCell<HashMap<String, Vec<String>>>,
    fail_list: bool,
    fail_submit: bool,
    submit_calls: RefCell<Vec<(String, String)>>,
    list_calls: RefCell<Vec<String>>,
}

impl MockWebmaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register `sitemap_url` as already submitted for `site_url`.
    pub fn with_submitted(self, site_url: &str, sitemap_url: &str) -> Self {
        self.submitted
            .borrow_mut()
            .entry(site_url.to_string())
            .or_default()
            .push(sitemap_url.to_string());
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn submit_calls(&self) -> Vec<(String, String)> {
        self.submit_calls.borrow().clone()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.borrow().clone()
    }
}

impl WebmasterApi for MockWebmaster {
    fn list_sitemaps(&self, site_url: &str) -> Result<Vec<SubmittedSitemap>, SitemapError> {
        self.list_calls.borrow_mut().push(site_url.to_string());
        if self.fail_list {
            return Err(SitemapError::Api("list sitemaps returned HTTP 503".to_string()));
        }
        Ok(self
            .submitted
            .borrow()
            .get(site_url)
            .map(|paths| paths.iter().map(|p| SubmittedSitemap::with_path(p)).collect())
            .unwrap_or_default())
    }

    fn submit_sitemap(&self, site_url: &str, sitemap_url: &str) -> Result<(), SitemapError> {
        self.submit_calls
            .borrow_mut()
            .push((site_url.to_string(), sitemap_url.to_string()));
        if self.fail_submit {
            return Err(SitemapError::Api("submit sitemap returned HTTP 403: User does not have sufficient permission".to_string()));
        }
        self.submitted
            .borrow_mut()
            .entry(site_url.to_string())
            .or_default()
            .push(sitemap_url.to_string());
        Ok(())
    }
}

/// A wiremock server for the blocking clients.
///
/// The server answers from its own thread, so requests are sent from the test
/// thread outside of `block_on`.
pub struct HttpStub {
    server: MockServer,
    runtime: Runtime,
}

impl HttpStub {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Panics if any mounted `expect(..)` was not met.
    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}
