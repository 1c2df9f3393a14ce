//! Chat pipeline facade.

use crate::analysis::CodeScanner;
use crate::error::CoreError;
use crate::improve::ImprovementApplier;
use crate::knowledge::KnowledgeExtractor;
use crate::messages;
use autodidact_rs_config::AnalysisConfig;
use autodidact_rs_protocol::{
    ChatResponse, CodeAnalysis, DEFAULT_MAX_RESULTS, ImprovementKind, ImprovementOutcome,
    SearchResult, now_timestamp,
};
use autodidact_rs_search::WebSearcher;
use log::{debug, info};
use std::path::Path;

/// Number of search results and improvements listed in a chat response.
pub const RESPONSE_PREVIEW_LIMIT: usize = 3;
/// Number of detected improvements applied per chat message.
pub const RESPONSE_APPLY_LIMIT: usize = 2;
const SNIPPET_PREVIEW_CHARS: usize = 100;

/// Runs search, analysis and improvement steps and composes chat replies.
///
/// Holds no per-request state; every call recomputes search results and the
/// code analysis from scratch.
#[derive(Debug)]
pub struct Assistant {
    searcher: WebSearcher,
    scanner: CodeScanner,
    applier: ImprovementApplier,
    extractor: KnowledgeExtractor,
}

impl Assistant {
    pub fn new(searcher: WebSearcher, analysis: &AnalysisConfig) -> Result<Self, CoreError> {
        Ok(Self {
            searcher,
            scanner: CodeScanner::new(analysis.files.clone())?,
            applier: ImprovementApplier::new(),
            extractor: KnowledgeExtractor::new()?,
        })
    }

    /// Web search with fallback; never fails.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.searcher.search(query, max_results).await
    }

    /// Scan the configured source files.
    pub async fn analyze(&self) -> CodeAnalysis {
        self.scanner.scan().await
    }

    /// Run the handler for every kind in `kinds`.
    pub fn apply_improvements(&self, kinds: &[ImprovementKind]) -> ImprovementOutcome {
        self.applier.apply(kinds)
    }

    /// Extract knowledge strings from a file on disk.
    pub async fn extract_knowledge(&self, path: &Path) -> Vec<String> {
        self.extractor.extract_file(path).await
    }

    /// Compose the reply to one chat message.
    pub async fn generate_response(&self, message: &str) -> ChatResponse {
        let results = self.search(message, DEFAULT_MAX_RESULTS).await;
        let analysis = self.analyze().await;
        let improvements = analysis.potential_improvements;

        let mut parts = vec![messages::greeting(message)];
        if !results.is_empty() {
            parts.push(messages::search_header(results.len()));
            for (idx, result) in results.iter().take(RESPONSE_PREVIEW_LIMIT).enumerate() {
                let preview: String = result.snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect();
                parts.push(messages::search_line(idx + 1, &result.title, &preview));
            }
        }
        if !improvements.is_empty() {
            parts.push(messages::improvements_header(improvements.len()));
            parts.extend(
                improvements
                    .iter()
                    .take(RESPONSE_PREVIEW_LIMIT)
                    .map(|kind| messages::improvement_line(*kind)),
            );
            let to_apply = &improvements[..improvements.len().min(RESPONSE_APPLY_LIMIT)];
            let outcome = self.apply_improvements(to_apply);
            parts.push(if outcome.success {
                messages::APPLY_SUCCEEDED.to_string()
            } else {
                messages::APPLY_FAILED.to_string()
            });
        }

        let knowledge_gained: Vec<String> = results
            .iter()
            .take(RESPONSE_PREVIEW_LIMIT)
            .flat_map(|result| result.improvements.iter().cloned())
            .collect();
        info!(
            "composed chat response (results={}, improvements={}, knowledge={})",
            results.len(),
            improvements.len(),
            knowledge_gained.len()
        );
        debug!("chat response parts (count={})", parts.len());

        ChatResponse {
            response: parts.join("\n\n"),
            timestamp: now_timestamp(),
            improvements,
            knowledge_gained,
        }
    }
}
