//! Search facade used by the assistant and the search endpoint.

use crate::{DuckDuckGoProvider, SearchError, WebProvider, fallback_knowledge};
use autodidact_rs_config::SearchConfig;
use autodidact_rs_protocol::SearchResult;
use log::{debug, info, warn};
use std::sync::Arc;

/// Runs one live search attempt and falls back to built-in knowledge on failure.
///
/// There is no retry, backoff, or caching: every call repeats the network attempt.
#[derive(Clone)]
pub struct WebSearcher {
    provider: Option<Arc<dyn WebProvider>>,
}

impl std::fmt::Debug for WebSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearcher")
            .field("online", &self.is_online())
            .finish()
    }
}

impl WebSearcher {
    /// Searcher backed by the given provider.
    pub fn new(provider: Arc<dyn WebProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Searcher that always answers from the fallback table.
    pub fn offline() -> Self {
        Self { provider: None }
    }

    /// Build a searcher from config, using DuckDuckGo when search is enabled.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if !config.enabled {
            info!("network search disabled; using fallback knowledge only");
            return Ok(Self::offline());
        }
        let provider = DuckDuckGoProvider::new(config)?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Whether a live provider is configured.
    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    /// Search for `query`, returning at most `max_results` live results.
    ///
    /// Never fails: provider errors are logged and replaced with fallback data.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let Some(provider) = self.provider.as_ref() else {
            return fallback_knowledge(query);
        };
        match provider.search(query, max_results).await {
            Ok(results) => {
                debug!("live search succeeded (results={})", results.len());
                results
            }
            Err(err) => {
                warn!("search failed, using fallback knowledge: {err}");
                fallback_knowledge(query)
            }
        }
    }
}
