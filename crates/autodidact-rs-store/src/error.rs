//! Error types for store operations.

/// Errors returned by document stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Backend is not reachable or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
