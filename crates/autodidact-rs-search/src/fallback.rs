//! Built-in knowledge used when live search is unavailable.

use autodidact_rs_protocol::{SearchResult, now_timestamp};

/// One entry of the fallback knowledge table.
#[derive(Debug, Clone, Copy)]
pub struct FallbackEntry {
    /// Lowercase keyword matched against the query.
    pub key: &'static str,
    pub title: &'static str,
    pub snippet: &'static str,
    /// Knowledge hints reported as `knowledge_gained` in chat responses.
    pub hints: &'static [&'static str],
}

/// Fallback table, in match order.
pub const FALLBACK_KNOWLEDGE: [FallbackEntry; 4] = [
    FallbackEntry {
        key: "python",
        title: "Python улучшения производительности",
        snippet: "Используйте async/await для асинхронных операций, list comprehensions для оптимизации циклов, кэширование с functools.lru_cache",
        hints: &["async/await", "list comprehensions", "caching", "type hints"],
    },
    FallbackEntry {
        key: "javascript",
        title: "JavaScript современные практики",
        snippet: "Используйте arrow functions, destructuring, async/await, модули ES6",
        hints: &["arrow functions", "destructuring", "modules", "promises"],
    },
    FallbackEntry {
        key: "react",
        title: "React оптимизация",
        snippet: "Используйте React.memo, useMemo, useCallback для предотвращения ненужных рендеров",
        hints: &["memo", "hooks optimization", "virtual dom", "state management"],
    },
    FallbackEntry {
        key: "fastapi",
        title: "FastAPI лучшие практики",
        snippet: "Используйте dependency injection, async endpoints, pydantic models, middleware",
        hints: &["dependencies", "async", "validation", "middleware"],
    },
];

/// Canned results for every table keyword contained in `query`, ignoring case.
pub fn fallback_knowledge(query: &str) -> Vec<SearchResult> {
    let query = query.to_lowercase();
    FALLBACK_KNOWLEDGE
        .iter()
        .filter(|entry| query.contains(entry.key))
        .map(|entry| SearchResult {
            title: entry.title.to_string(),
            snippet: entry.snippet.to_string(),
            url: format!("internal://knowledge/{}", entry.key),
            timestamp: now_timestamp(),
            improvements: entry.hints.iter().map(|hint| hint.to_string()).collect(),
        })
        .collect()
}
