//! Error types.
//!
//! `SitemapError` is what the pipeline stages return; the caller decides per
//! kind whether to skip the current item or abort the run. `AppError` is the
//! process-level error handed back to `main`, carrying an exit code.

use thiserror::Error;

/// Coarse classification of a `SitemapError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Network,
    Parse,
    Api,
}

/// Errors produced while discovering, classifying or submitting sitemaps.
#[derive(Debug, Clone, Error)]
pub enum SitemapError {
    /// Missing or unusable configuration (credentials, HTTP client setup).
    #[error("configuration error: {0}")]
    Config(String),

    /// A fetch failed or returned something other than HTTP 200.
    #[error("network error: {0}")]
    Network(String),

    /// The document is not well-formed XML.
    #[error("parse error: {0}")]
    Parse(String),

    /// The webmaster API (or its token endpoint) rejected a request.
    #[error("API error: {0}")]
    Api(String),
}

impl SitemapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SitemapError::Config(_) => ErrorKind::Config,
            SitemapError::Network(_) => ErrorKind::Network,
            SitemapError::Parse(_) => ErrorKind::Parse,
            SitemapError::Api(_) => ErrorKind::Api,
        }
    }

    /// Only configuration errors end the run; everything else skips one item.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Config
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SitemapError> for AppError {
    fn from(err: SitemapError) -> Self {
        let exit_code = if err.is_fatal() { 2 } else { 4 };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
