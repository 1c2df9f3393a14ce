//! Superficial pattern scan over a fixed list of source files.

use crate::error::{CoreError, compile};
use autodidact_rs_protocol::{CodeAnalysis, ImprovementKind};
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};

const INDEX_LOOP_PATTERN: &str = r"for \w+ in range\(len\(";

/// Scans configured files for a handful of substring patterns.
///
/// This is not static analysis: each check is a plain substring or regex test
/// over the whole file, and findings carry no per-file attribution.
#[derive(Debug, Clone)]
pub struct CodeScanner {
    files: Vec<PathBuf>,
    index_loop: Regex,
}

impl CodeScanner {
    /// Create a scanner over the given files, checked in order.
    pub fn new(files: Vec<PathBuf>) -> Result<Self, CoreError> {
        Ok(Self {
            files,
            index_loop: compile(INDEX_LOOP_PATTERN)?,
        })
    }

    /// Files inspected by [`CodeScanner::scan`].
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Scan every configured file. Never fails.
    pub async fn scan(&self) -> CodeAnalysis {
        let mut analysis = CodeAnalysis::default();
        for path in &self.files {
            if tokio::fs::metadata(path).await.is_err() {
                debug!("skipping missing file (path={})", path.display());
                continue;
            }
            analysis.files_analyzed += 1;
            let content = match tokio::fs::read_to_string(path).await {
                Ok(content) => content,
                Err(err) => {
                    warn!("failed to read file for analysis (path={}): {err}", path.display());
                    continue;
                }
            };
            analysis
                .potential_improvements
                .extend(self.inspect(path, &content));
        }
        debug!(
            "code analysis complete (files_analyzed={}, improvements={})",
            analysis.files_analyzed,
            analysis.potential_improvements.len()
        );
        analysis
    }

    /// Findings for one file, dispatched on its extension.
    pub fn inspect(&self, path: &Path, content: &str) -> Vec<ImprovementKind> {
        let mut found = Vec::new();
        match extension(path).as_deref() {
            Some("py") => {
                let defines = content.contains("def ");
                if defines && !content.contains("async def") && !content.contains("await") {
                    found.push(ImprovementKind::AddAsyncFunctions);
                }
                if defines && !content.contains("->") {
                    found.push(ImprovementKind::AddTypeHints);
                }
                if self.index_loop.is_match(content) {
                    found.push(ImprovementKind::UseEnumerate);
                }
            }
            Some("js") => {
                if content.contains("var ") {
                    found.push(ImprovementKind::ReplaceVarWithConstLet);
                }
                if content.contains("function(") {
                    found.push(ImprovementKind::UseArrowFunctions);
                }
            }
            Some("css") => {
                if !content.contains(":root") {
                    found.push(ImprovementKind::AddCssVariables);
                }
            }
            _ => {}
        }
        found
    }
}

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
