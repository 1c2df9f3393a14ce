//! Error types for the core pipeline.

use thiserror::Error;

/// Errors returned by core pipeline components.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A built-in pattern failed to compile.
    #[error("invalid pattern {pattern}: {message}")]
    Pattern { pattern: &'static str, message: String },
    /// An improvement action reported a failure.
    #[error("{0}")]
    Action(String),
}

pub(crate) fn compile(pattern: &'static str) -> Result<regex::Regex, CoreError> {
    regex::Regex::new(pattern).map_err(|err| CoreError::Pattern {
        pattern,
        message: err.to_string(),
    })
}
