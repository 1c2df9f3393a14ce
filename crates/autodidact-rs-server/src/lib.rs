//! HTTP surface for Autodidact.
//!
//! Every route lives under `/api`. Handlers share one [`AppState`]; failures
//! are reported as HTTP 500 with a localized `detail` message.

pub mod error;
mod handlers;
mod middleware;
pub mod routes;
pub mod state;
pub mod uploads;

pub use error::{ApiError, ApiResult, Endpoint, Failure};
pub use routes::router;
pub use state::AppState;

use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("autodidact api listening (addr={})", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
