//! Sitemap Locator: fetch each candidate and expand sitemap indexes.

use tracing::{error, info, warn};

use crate::domain::{Candidate, SitemapEntry, SitemapKind};
use crate::sitemap::classify::classify;
use crate::sitemap::fetch::SitemapFetcher;

/// Probe every candidate and return the sitemaps found, in candidate order.
///
/// A candidate that does not answer with HTTP 200 is logged and skipped; there
/// are no retries. An index contributes one entry per child sitemap; a leaf or
/// unparseable document contributes the candidate URL itself.
pub fn locate_sitemaps<F>(fetcher: &F, candidates: impl IntoIterator<Item = Candidate>) -> Vec<SitemapEntry>
where
    F: SitemapFetcher + ?Sized,
{
    let mut found = Vec::new();

    for candidate in candidates {
        let site_url = candidate.site_url();
        let url = candidate.sitemap_url();

        let body = match fetcher.fetch(&url) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch {url}: {e}");
                continue;
            }
        };
        info!("Sitemap found: {url}");

        match classify(&body) {
            Ok(SitemapKind::Index(children)) => {
                info!("{url} is a sitemap index with {} child sitemaps", children.len());
                found.extend(
                    children
                        .into_iter()
                        .map(|child| SitemapEntry::new(site_url.as_str(), child)),
                );
            }
            Ok(SitemapKind::Leaf) => found.push(SitemapEntry::new(site_url, url)),
            Err(e) => {
                error!("Failed to parse {url}: {e}");
                found.push(SitemapEntry::new(site_url, url));
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::candidates::candidates;
    use crate::testing::MockFetcher;

    const LEAF: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
        <url><loc>https://example.com/</loc></url>
    </urlset>"#;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn returns_entries_exactly_for_reachable_candidates() {
        let fetcher = MockFetcher::new()
            .with("https://docs.ocrize.com/sitemap.xml", LEAF)
            .with("https://www.sheetize.com/sitemap.xml", LEAF);

        let domains = strings(&["ocrize", "sheetize", "psdize"]);
        let subdomains = strings(&["docs", "www"]);
        let tlds = strings(&["com"]);

        let found = locate_sitemaps(&fetcher, candidates(&domains, &subdomains, &tlds));

        assert_eq!(
            found,
            vec![
                SitemapEntry::new("https://docs.ocrize.com", "https://docs.ocrize.com/sitemap.xml"),
                SitemapEntry::new("https://www.sheetize.com", "https://www.sheetize.com/sitemap.xml"),
            ]
        );
        assert_eq!(fetcher.requested().len(), 6);
    }

    #[test]
    fn index_expands_to_children_under_the_same_site() {
        let index = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>https://blog.ocrize.com/posts.xml</loc></sitemap>
            <sitemap><loc>https://blog.ocrize.com/tags.xml</loc></sitemap>
        </sitemapindex>"#;
        let fetcher = MockFetcher::new().with("https://blog.ocrize.com/sitemap.xml", index);

        let found = locate_sitemaps(&fetcher, [Candidate::new("blog", "ocrize", "com")]);

        assert_eq!(
            found,
            vec![
                SitemapEntry::new("https://blog.ocrize.com", "https://blog.ocrize.com/posts.xml"),
                SitemapEntry::new("https://blog.ocrize.com", "https://blog.ocrize.com/tags.xml"),
            ]
        );
    }

    #[test]
    fn unparseable_sitemap_is_kept_as_leaf() {
        let fetcher = MockFetcher::new().with("https://docs.ocrize.com/sitemap.xml", "<urlset><url>");

        let found = locate_sitemaps(&fetcher, [Candidate::new("docs", "ocrize", "com")]);

        assert_eq!(
            found,
            vec![SitemapEntry::new("https://docs.ocrize.com", "https://docs.ocrize.com/sitemap.xml")]
        );
    }

    #[test]
    fn nothing_reachable_yields_nothing() {
        let fetcher = MockFetcher::new();
        let found = locate_sitemaps(&fetcher, [Candidate::new("docs", "ocrize", "com")]);
        assert!(found.is_empty());
    }
}
