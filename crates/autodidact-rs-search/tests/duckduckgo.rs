//! DuckDuckGo provider against a local HTTP stand-in.

use autodidact_rs_config::SearchConfig;
use autodidact_rs_search::{DuckDuckGoProvider, SearchError, WebProvider, WebSearcher};
use std::net::SocketAddr;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const RESULTS_PAGE: &str = r#"
<html><body>
  <div class="result__body">
    <h2 class="result__title"><a href="https://tokio.rs">Tokio</a></h2>
    <a class="result__snippet">An asynchronous runtime.</a>
  </div>
  <div class="result__body">
    <h2 class="result__title"><a href="https://docs.rs/axum">axum</a></h2>
    <a class="result__snippet">Web framework.</a>
  </div>
</body></html>
"#;

type SeenQueries = Arc<Mutex<Vec<String>>>;

async fn results_page(
    State(seen): State<SeenQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    if let Some(query) = params.get("q") {
        seen.lock().expect("lock").push(query.clone());
    }
    Html(RESULTS_PAGE)
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/html/")
}

fn config_for(base_url: String) -> SearchConfig {
    SearchConfig {
        base_url,
        timeout_secs: 5,
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn sends_query_with_suffix_and_parses_results() {
    let seen: SeenQueries = Arc::default();
    let router = Router::new()
        .route("/html/", get(results_page))
        .with_state(seen.clone());
    let base_url = spawn(router).await;

    let provider = DuckDuckGoProvider::new(&config_for(base_url)).expect("provider");
    let results = provider.search("async rust", 10).await.expect("search");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Tokio");
    assert_eq!(results[1].url, "https://docs.rs/axum");
    assert_eq!(
        seen.lock().expect("lock").clone(),
        vec!["async rust programming code python javascript".to_string()]
    );
}

#[tokio::test]
async fn non_success_status_yields_no_results() {
    let router = Router::new().route("/html/", get(unavailable));
    let base_url = spawn(router).await;

    let provider = DuckDuckGoProvider::new(&config_for(base_url)).expect("provider");
    let results = provider.search("python", 10).await.expect("search");
    assert!(results.is_empty());
}

#[tokio::test]
async fn searcher_keeps_empty_results_when_upstream_refuses() {
    let router = Router::new().route("/html/", get(unavailable));
    let base_url = spawn(router).await;

    let searcher = WebSearcher::from_config(&config_for(base_url)).expect("searcher");
    assert!(searcher.search("Python async", 10).await.is_empty());
}

/// Address that was just bound and released, so connections are refused.
async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("addr")
}

#[tokio::test]
async fn unreachable_engine_is_a_transport_error() {
    let base_url = format!("http://{}/html/", closed_addr().await);

    let provider = DuckDuckGoProvider::new(&config_for(base_url)).expect("provider");
    let err = provider.search("python", 10).await.unwrap_err();
    assert!(matches!(err, SearchError::Http(_)), "{err}");
}

#[tokio::test]
async fn searcher_falls_back_when_engine_is_unreachable() {
    let base_url = format!("http://{}/html/", closed_addr().await);

    let searcher = WebSearcher::from_config(&config_for(base_url)).expect("searcher");
    let results = searcher.search("Python async", 10).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "internal://knowledge/python");
}
