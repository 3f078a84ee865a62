//! `sitemap-submit` library crate.
//!
//! The binary (`sitemap-submit`) is a thin wrapper around this library so that:
//!
//! - each stage (discover, classify, submit) is testable without network access
//! - fetching and the webmaster API sit behind traits that tests can replace

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod report;
pub mod sitemap;
pub mod submit;
pub mod telemetry;
pub mod webmaster;

#[cfg(test)]
mod testing;
