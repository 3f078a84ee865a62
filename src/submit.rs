//! Submission Gate: submit a sitemap only if the webmaster API does not already list it.

use tracing::{error, info};

use crate::domain::{SitemapEntry, SubmitMode, SubmitOutcome};
use crate::error::SitemapError;
use crate::webmaster::WebmasterApi;

/// Check whether `entry` is already registered and submit it if not.
///
/// A failed status query is logged and treated as "not submitted", so the
/// submission is still attempted. A failed submission is returned to the caller.
pub fn submit_if_absent<A>(api: &A, entry: &SitemapEntry, mode: SubmitMode) -> Result<SubmitOutcome, SitemapError>
where
    A: WebmasterApi + ?Sized,
{
    if is_submitted(api, entry) {
        info!("Sitemap already submitted: {}", entry.sitemap_url);
        return Ok(SubmitOutcome::AlreadySubmitted);
    }

    if mode == SubmitMode::DryRun {
        info!("Would submit sitemap: {} (site {})", entry.sitemap_url, entry.site_url);
        return Ok(SubmitOutcome::WouldSubmit);
    }

    api.submit_sitemap(&entry.site_url, &entry.sitemap_url)?;
    info!("Submitted sitemap to Google: {}", entry.sitemap_url);
    Ok(SubmitOutcome::Submitted)
}

fn is_submitted<A>(api: &A, entry: &SitemapEntry) -> bool
where
    A: WebmasterApi + ?Sized,
{
    match api.list_sitemaps(&entry.site_url) {
        Ok(existing) => existing.iter().any(|sm| sm.path == entry.sitemap_url),
        Err(e) => {
            error!("Failed to check sitemap status for {}: {e}", entry.sitemap_url);
            false
        }
    }
}
