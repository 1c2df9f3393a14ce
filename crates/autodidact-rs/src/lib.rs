//! Public surface for Autodidact.
//!
//! Re-exports the workspace crates and wires a loaded config into the state
//! the HTTP server runs on.

/// Re-export for convenience.
pub use autodidact_rs_config as config;
pub use autodidact_rs_core as core;
/// Re-export for convenience.
pub use autodidact_rs_protocol as protocol;
pub use autodidact_rs_search as search;
pub use autodidact_rs_server as server;
pub use autodidact_rs_store as store;

use anyhow::Context;
use autodidact_rs_config::AutodidactConfig;
use autodidact_rs_core::Assistant;
use autodidact_rs_search::WebSearcher;
use autodidact_rs_server::AppState;
use autodidact_rs_store::{DocumentStore, FileDocumentStore};
use log::info;
use std::sync::Arc;

/// Build the shared server state from a validated config.
pub fn build_state(config: &AutodidactConfig) -> anyhow::Result<AppState> {
    let searcher =
        WebSearcher::from_config(&config.search).context("failed to build web searcher")?;
    let assistant =
        Assistant::new(searcher, &config.analysis).context("failed to build assistant")?;

    let store_path = config.store.resolve_path();
    let store: Arc<dyn DocumentStore> = Arc::new(
        FileDocumentStore::new(&store_path).context("failed to open document store")?,
    );
    let uploads_dir = config.uploads.resolve_dir();
    info!(
        "state ready (store={}, uploads={}, search_online={})",
        store_path.display(),
        uploads_dir.display(),
        config.search.enabled
    );
    Ok(AppState::new(assistant, store, uploads_dir))
}

#[cfg(test)]
mod tests {
    use super::build_state;
    use autodidact_rs_config::{AutodidactConfig, SearchConfig, StoreConfig, UploadsConfig};
    use autodidact_rs_store::DocumentStore;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn state_uses_configured_paths() {
        let temp = tempdir().expect("tempdir");
        let store = temp.path().join("store");
        let uploads = temp.path().join("uploads");
        let config = AutodidactConfig::builder()
            .search(SearchConfig {
                enabled: false,
                ..SearchConfig::default()
            })
            .store(StoreConfig {
                path: Some(store.to_string_lossy().to_string()),
            })
            .uploads(UploadsConfig {
                dir: Some(uploads.to_string_lossy().to_string()),
            })
            .build();

        let state = build_state(&config).expect("state");
        assert!(store.is_dir());
        assert_eq!(state.uploads_dir, uploads);
        assert!(state.store.recent_messages(50).await.expect("history").is_empty());
    }
}
