//! HTTP request and response bodies.

use crate::{ImprovementKind, ImprovementRecord, MessageRecord, SearchResult};
use serde::{Deserialize, Serialize};

/// Result count used when a search request does not specify one.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// `POST /api/chat` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Client-side timestamp; accepted but not used.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// `POST /api/chat` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
    #[serde(default)]
    pub improvements: Vec<ImprovementKind>,
    #[serde(default)]
    pub knowledge_gained: Vec<String>,
}

/// `POST /api/search` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl SearchRequest {
    /// Requested result count, falling back to the default.
    pub fn limit(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}

/// `POST /api/search` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub count: usize,
}

impl From<Vec<SearchResult>> for SearchResponse {
    fn from(results: Vec<SearchResult>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}

/// `GET /api/` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

/// `GET /api/history` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<MessageRecord>,
}

/// `GET /api/improvements-history` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementsHistoryResponse {
    pub improvements: Vec<ImprovementRecord>,
}

/// `POST /api/upload-knowledge` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub knowledge_extracted: usize,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
