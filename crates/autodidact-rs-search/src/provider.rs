//! Web provider interface.

use crate::SearchError;
use async_trait::async_trait;
use autodidact_rs_protocol::SearchResult;

/// Web provider interface for search queries.
#[async_trait]
pub trait WebProvider: Send + Sync {
    /// Perform a web search query returning at most `limit` results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError>;
}
