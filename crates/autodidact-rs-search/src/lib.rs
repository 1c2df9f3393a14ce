//! Web search with an offline fallback table.

pub mod duckduckgo;
pub mod error;
pub mod fallback;
pub mod provider;
pub mod searcher;

/// DuckDuckGo HTML provider.
pub use duckduckgo::{DuckDuckGoProvider, parse_results};
/// Search error type.
pub use error::SearchError;
/// Static fallback knowledge.
pub use fallback::{FALLBACK_KNOWLEDGE, FallbackEntry, fallback_knowledge};
/// Provider interface.
pub use provider::WebProvider;
/// Search facade that degrades to fallback data.
pub use searcher::WebSearcher;
