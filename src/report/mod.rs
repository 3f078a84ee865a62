//! Reporting utilities: plain-text run summaries.

use std::fmt::Write;

use crate::domain::{RunSummary, SitemapEntry, SubmitOutcome};

/// Summary of a `run`: counts, then the entries grouped by outcome.
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    if summary.dry_run {
        let _ = writeln!(out, "Dry run: nothing was submitted.");
    }
    let _ = writeln!(out, "Sitemaps discovered: {}", summary.discovered());
    let _ = writeln!(out, "  submitted:          {}", summary.count(SubmitOutcome::Submitted));
    if summary.dry_run {
        let _ = writeln!(out, "  would submit:       {}", summary.count(SubmitOutcome::WouldSubmit));
    }
    let _ = writeln!(
        out,
        "  already submitted:  {}",
        summary.count(SubmitOutcome::AlreadySubmitted)
    );
    let _ = write!(out, "  failed:             {}", summary.failed.len());

    for (title, outcome) in [
        ("Submitted", SubmitOutcome::Submitted),
        ("Would submit", SubmitOutcome::WouldSubmit),
        ("Already submitted", SubmitOutcome::AlreadySubmitted),
    ] {
        let entries: Vec<&SitemapEntry> = summary
            .processed
            .iter()
            .filter(|r| r.outcome == outcome)
            .map(|r| &r.entry)
            .collect();
        if entries.is_empty() {
            continue;
        }
        let _ = write!(out, "\n\n{title}:");
        for entry in entries {
            let _ = write!(out, "\n  {}", entry.sitemap_url);
        }
    }

    if !summary.failed.is_empty() {
        let _ = write!(out, "\n\nFailed:");
        for failed in &summary.failed {
            let _ = write!(out, "\n  {}\n    {}", failed.entry.sitemap_url, failed.error);
        }
    }

    out
}

/// Table of discovered sitemaps for the `discover` command.
pub fn format_discovered(entries: &[SitemapEntry]) -> String {
    if entries.is_empty() {
        return "No sitemaps found.".to_string();
    }

    let width = entries.iter().map(|e| e.site_url.len()).max().unwrap_or(0);
    let mut out = format!("Found {} sitemap(s):", entries.len());
    for entry in entries {
        let _ = write!(out, "\n  {:<width$}  {}", entry.site_url, entry.sitemap_url);
    }
    out
}
