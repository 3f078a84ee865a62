//! Sitemap discovery.
//!
//! - candidate generation (`candidates`)
//! - HTTP fetching behind a trait (`fetch`)
//! - index/leaf classification (`classify`)
//! - the locator tying them together (`locator`)

pub mod candidates;
pub mod classify;
pub mod fetch;
pub mod locator;

pub use candidates::candidates;
pub use classify::{SITEMAP_NS, child_sitemaps, classify, is_sitemap_index};
pub use fetch::{HttpFetcher, SitemapFetcher};
pub use locator::locate_sitemaps;
