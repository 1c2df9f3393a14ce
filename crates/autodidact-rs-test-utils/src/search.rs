use async_trait::async_trait;
use autodidact_rs_protocol::{SearchResult, now_timestamp};
use autodidact_rs_search::{SearchError, WebProvider};
use parking_lot::Mutex;

pub fn search_result(title: &str, snippet: &str, url: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
        url: url.to_string(),
        timestamp: now_timestamp(),
        improvements: Vec::new(),
    }
}

/// Provider returning fixed results and recording each `(query, limit)` call.
#[derive(Default)]
pub struct StubWebProvider {
    results: Vec<SearchResult>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl StubWebProvider {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl WebProvider for StubWebProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.lock().push((query.to_string(), limit));
        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

/// Provider whose every search fails with a parse error carrying `reason`.
#[derive(Debug, Clone, Copy)]
pub struct FailingWebProvider {
    pub reason: &'static str,
}

impl Default for FailingWebProvider {
    fn default() -> Self {
        Self {
            reason: "results page changed shape",
        }
    }
}

#[async_trait]
impl WebProvider for FailingWebProvider {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Parse(self.reason.to_string()))
    }
}
