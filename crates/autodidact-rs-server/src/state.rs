//! Shared handler state.

use autodidact_rs_core::Assistant;
use autodidact_rs_store::DocumentStore;
use std::path::PathBuf;
use std::sync::Arc;

/// State shared by every request handler.
pub struct AppState {
    pub assistant: Assistant,
    pub store: Arc<dyn DocumentStore>,
    /// Directory uploads are staged in before extraction.
    pub uploads_dir: PathBuf,
}

impl AppState {
    pub fn new(
        assistant: Assistant,
        store: Arc<dyn DocumentStore>,
        uploads_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            assistant,
            store,
            uploads_dir: uploads_dir.into(),
        }
    }
}
