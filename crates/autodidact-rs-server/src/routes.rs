//! Route table.

use crate::handlers;
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the API router with permissive CORS and request logging.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/", get(handlers::root))
        .route("/api/chat", post(handlers::chat))
        .route("/api/search", post(handlers::search))
        .route("/api/analyze", get(handlers::analyze))
        .route("/api/improve", post(handlers::improve))
        .route("/api/history", get(handlers::history))
        .route("/api/improvements-history", get(handlers::improvements_history))
        .route("/api/upload-knowledge", post(handlers::upload_knowledge))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::middleware::from_fn(log_requests))
}
