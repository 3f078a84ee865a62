//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`DiscoveryConfig`) and its production defaults
//! - discovery values (`Candidate`, `SitemapEntry`, `SitemapKind`)
//! - submission results (`SubmitOutcome`, `RunSummary`)

pub mod types;

pub use types::*;
