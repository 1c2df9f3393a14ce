//! Knowledge extraction from uploaded files.

use crate::analysis::extension;
use crate::error::{CoreError, compile};
use crate::messages;
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

const PYTHON_IMPORT: &str = r"(?:from|import)\s+(\w+)";
const PYTHON_DEF: &str = r"def\s+(\w+)";
const JS_IMPORT: &str = r#"import.*from\s+['"]([^'"]+)['"]"#;
const WORD: &str = r"\b[a-zA-Zа-яА-Я]{5,}\b";
const URL: &str = r"https?://\S+";

const MAX_PYTHON_MODULES: usize = 10;
const MAX_PYTHON_FUNCTIONS: usize = 5;
const MAX_JS_MODULES: usize = 10;
const MAX_KEYWORDS: usize = 20;
const MAX_URLS: usize = 5;

/// Regex-based extractor producing short labeled knowledge strings.
#[derive(Debug, Clone)]
pub struct KnowledgeExtractor {
    python_import: Regex,
    python_def: Regex,
    js_import: Regex,
    word: Regex,
    url: Regex,
}

impl KnowledgeExtractor {
    /// Compile the extraction patterns.
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            python_import: compile(PYTHON_IMPORT)?,
            python_def: compile(PYTHON_DEF)?,
            js_import: compile(JS_IMPORT)?,
            word: compile(WORD)?,
            url: compile(URL)?,
        })
    }

    /// Read `path` and extract knowledge from its content.
    ///
    /// A read failure yields a single `Ошибка обработки файла` entry instead of an error.
    pub async fn extract_file(&self, path: &Path) -> Vec<String> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let knowledge = self.extract(path, &content);
                debug!(
                    "extracted knowledge (path={}, entries={})",
                    path.display(),
                    knowledge.len()
                );
                knowledge
            }
            Err(err) => vec![messages::file_error(&err)],
        }
    }

    /// Extract knowledge from `content`, dispatching on the extension of `path`.
    pub fn extract(&self, path: &Path, content: &str) -> Vec<String> {
        let mut knowledge = Vec::new();
        match extension(path).as_deref() {
            Some("py") => {
                knowledge.extend(
                    captures(&self.python_import, content)
                        .take(MAX_PYTHON_MODULES)
                        .map(messages::python_module),
                );
                knowledge.extend(
                    captures(&self.python_def, content)
                        .take(MAX_PYTHON_FUNCTIONS)
                        .map(messages::python_function),
                );
            }
            Some("js" | "jsx") => {
                knowledge.extend(
                    captures(&self.js_import, content)
                        .take(MAX_JS_MODULES)
                        .map(messages::javascript_module),
                );
            }
            Some("txt" | "md") => {
                let mut seen = HashSet::new();
                knowledge.extend(
                    self.word
                        .find_iter(content)
                        .map(|found| found.as_str())
                        .filter(|word| seen.insert(*word))
                        .take(MAX_KEYWORDS)
                        .map(messages::keyword),
                );
            }
            _ => {}
        }
        knowledge.extend(
            self.url
                .find_iter(content)
                .take(MAX_URLS)
                .map(|found| messages::url(found.as_str())),
        );
        knowledge
    }
}

fn captures<'a>(regex: &'a Regex, content: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    regex
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|group| group.as_str())
}
