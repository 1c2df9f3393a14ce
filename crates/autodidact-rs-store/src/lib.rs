//! Append-only persistence for chat turns, improvement runs and uploaded knowledge.

pub mod error;
pub mod provider;

/// Store error type.
pub use error::StoreError;
/// Store interface and default file implementation.
pub use provider::{
    DocumentStore, FileDocumentStore, IMPROVEMENT_HISTORY_LIMIT, MESSAGE_HISTORY_LIMIT,
    newest_first,
};
