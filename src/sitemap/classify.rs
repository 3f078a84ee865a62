//! Sitemap document classification.
//!
//! A document is a sitemap index when at least one `<loc>` element in the
//! sitemap protocol namespace, at any depth, has text ending in `.xml`. Those
//! values are the child sitemaps, kept in document order with duplicates.
//!
//! The whole document has to be well formed before anything is reported, so a
//! truncated index yields no children rather than a partial list.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::error;

use crate::domain::SitemapKind;
use crate::error::SitemapError;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Classify a sitemap document.
pub fn classify(xml: &str) -> Result<SitemapKind, SitemapError> {
    let children: Vec<String> = loc_values(xml)?
        .into_iter()
        .filter(|loc| loc.ends_with(".xml"))
        .collect();

    if children.is_empty() {
        Ok(SitemapKind::Leaf)
    } else {
        Ok(SitemapKind::Index(children))
    }
}

/// `true` if `xml` is a sitemap index. Malformed input is logged and reported as `false`.
pub fn is_sitemap_index(xml: &str) -> bool {
    match classify(xml) {
        Ok(kind) => matches!(kind, SitemapKind::Index(_)),
        Err(e) => {
            error!("Failed to parse sitemap index: {e}");
            false
        }
    }
}

/// Child sitemap URLs of an index. Malformed input is logged and yields nothing.
pub fn child_sitemaps(xml: &str) -> Vec<String> {
    match classify(xml) {
        Ok(SitemapKind::Index(children)) => children,
        Ok(SitemapKind::Leaf) => Vec::new(),
        Err(e) => {
            error!("Failed to parse individual sitemaps: {e}");
            Vec::new()
        }
    }
}

/// A `<loc>` element that has been opened but not yet closed.
struct OpenLoc {
    depth: usize,
    slot: usize,
    /// Text after the first child element is not part of the value.
    saw_child: bool,
}

/// Every attribute must be well formed, unique, and hold a valid value.
fn check_attributes(e: &BytesStart<'_>) -> Result<(), SitemapError> {
    let mut attributes = e.attributes();
    attributes.with_checks(true);
    for attr in attributes {
        let attr = attr.map_err(|err| SitemapError::Parse(format!("invalid attribute: {err}")))?;
        if attr.value.contains(&b'<') {
            return Err(SitemapError::Parse(
                "'<' in attribute value".to_string(),
            ));
        }
        attr.unescape_value()
            .map_err(|err| SitemapError::Parse(format!("invalid attribute value: {err}")))?;
    }
    Ok(())
}

/// Text of every namespaced `<loc>`, trimmed, in start-tag order.
fn loc_values(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = NsReader::from_str(xml);

    let mut values: Vec<String> = Vec::new();
    let mut open: Vec<OpenLoc> = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| SitemapError::Parse(e.to_string()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if depth == 0 && saw_root {
                    return Err(SitemapError::Parse(
                        "content after the root element".to_string(),
                    ));
                }
                saw_root = true;

                if let Some(current) = open.last_mut() {
                    if current.depth == depth {
                        current.saw_child = true;
                    }
                }

                if let ResolveResult::Unknown(prefix) = &ns {
                    return Err(SitemapError::Parse(format!(
                        "unbound namespace prefix '{}'",
                        String::from_utf8_lossy(prefix)
                    )));
                }
                let is_loc = e.local_name().as_ref() == b"loc"
                    && matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == SITEMAP_NS.as_bytes());

                check_attributes(e)?;

                if let Event::Start(_) = event {
                    depth += 1;
                    if is_loc {
                        values.push(String::new());
                        open.push(OpenLoc {
                            depth,
                            slot: values.len() - 1,
                            saw_child: false,
                        });
                    }
                } else if is_loc {
                    values.push(String::new());
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(SitemapError::Parse("unmatched end tag".to_string()));
                }
                if open.last().is_some_and(|current| current.depth == depth) {
                    open.pop();
                }
                depth -= 1;
            }
            Event::Text(ref e) => {
                if depth == 0 {
                    if !e.iter().all(u8::is_ascii_whitespace) {
                        return Err(SitemapError::Parse(
                            "text outside the root element".to_string(),
                        ));
                    }
                    continue;
                }
                let text = e
                    .unescape()
                    .map_err(|err| SitemapError::Parse(format!("invalid text: {err}")))?;
                if let Some(current) = open.last() {
                    if current.depth == depth && !current.saw_child {
                        values[current.slot].push_str(&text);
                    }
                }
            }
            Event::CData(ref e) => {
                if depth == 0 {
                    return Err(SitemapError::Parse(
                        "CDATA outside the root element".to_string(),
                    ));
                }
                if let Some(current) = open.last() {
                    if current.depth == depth && !current.saw_child {
                        values[current.slot].push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(SitemapError::Parse("no root element".to_string()));
    }
    if depth != 0 {
        return Err(SitemapError::Parse("unexpected end of document".to_string()));
    }

    Ok(values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect())
}
