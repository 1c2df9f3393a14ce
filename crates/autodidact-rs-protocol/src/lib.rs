//! Wire and storage types shared across Autodidact crates.

mod api;
mod improvement;

pub use api::{
    ChatRequest, ChatResponse, ErrorBody, HistoryResponse, ImprovementsHistoryResponse,
    SearchRequest, SearchResponse, StatusResponse, UploadResponse, DEFAULT_MAX_RESULTS,
};
pub use improvement::{ImprovementKind, UnknownImprovement};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current time as an RFC 3339 timestamp with fixed precision.
///
/// The fixed width keeps lexical order equal to chronological order, which the
/// store relies on when sorting history.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Single web search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result snippet.
    pub snippet: String,
    /// Result URL, or an `internal://knowledge/<key>` pseudo-URL for fallback hits.
    pub url: String,
    /// Time the result was produced.
    pub timestamp: String,
    /// Knowledge hints attached to fallback hits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

/// Snapshot produced by one pass of the code pattern scanner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeAnalysis {
    /// Number of configured files that existed.
    pub files_analyzed: usize,
    /// Detected improvements in file order, then check order.
    pub potential_improvements: Vec<ImprovementKind>,
    /// Always empty.
    pub patterns_found: Vec<String>,
    /// Always empty.
    pub suggestions: Vec<String>,
}

/// Labels that were applied and the errors that were collected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImprovementDetails {
    pub applied: Vec<ImprovementKind>,
    pub errors: Vec<String>,
}

/// Result of an improvement run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImprovementOutcome {
    /// True when at least one improvement was applied.
    pub success: bool,
    /// Human-readable summary with applied and error counts.
    pub message: String,
    pub details: ImprovementDetails,
}

/// Persisted improvement run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImprovementRecord {
    pub timestamp: String,
    pub success: bool,
    pub message: String,
    pub applied: Vec<ImprovementKind>,
    pub errors: Vec<String>,
    /// Analysis the run was based on.
    pub analysis: CodeAnalysis,
}

impl ImprovementRecord {
    /// Build a record stamped with the current time.
    pub fn new(outcome: ImprovementOutcome, analysis: CodeAnalysis) -> Self {
        Self {
            timestamp: now_timestamp(),
            success: outcome.success,
            message: outcome.message,
            applied: outcome.details.applied,
            errors: outcome.details.errors,
            analysis,
        }
    }
}

/// Persisted knowledge extracted from an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeRecord {
    /// Internal identifier the upload was stored under.
    pub id: Uuid,
    /// Client-supplied filename, metadata only.
    pub filename: String,
    pub timestamp: String,
    pub knowledge: Vec<String>,
    /// Upload size in bytes.
    pub size: u64,
}

/// One side of a chat turn.
///
/// User and AI records are stored independently; nothing links them beyond
/// timestamps and insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageRecord {
    User {
        user_message: String,
        timestamp: String,
    },
    Ai {
        ai_response: String,
        timestamp: String,
        improvements: Vec<ImprovementKind>,
        knowledge_gained: Vec<String>,
    },
}

impl MessageRecord {
    /// Record for an incoming user message, stamped now.
    pub fn user(message: impl Into<String>) -> Self {
        MessageRecord::User {
            user_message: message.into(),
            timestamp: now_timestamp(),
        }
    }

    /// Record for a generated response.
    pub fn ai(response: &ChatResponse) -> Self {
        MessageRecord::Ai {
            ai_response: response.response.clone(),
            timestamp: response.timestamp.clone(),
            improvements: response.improvements.clone(),
            knowledge_gained: response.knowledge_gained.clone(),
        }
    }

    /// Timestamp used for history ordering.
    pub fn timestamp(&self) -> &str {
        match self {
            MessageRecord::User { timestamp, .. } | MessageRecord::Ai { timestamp, .. } => {
                timestamp
            }
        }
    }
}
