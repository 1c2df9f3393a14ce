//! Error types for web search.

/// Errors returned by web providers.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport failure, timeout, or client construction failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Markup could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}
