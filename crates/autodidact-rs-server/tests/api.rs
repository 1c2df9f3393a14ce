use autodidact_rs_config::AnalysisConfig;
use autodidact_rs_core::Assistant;
use autodidact_rs_protocol::{ImprovementRecord, MessageRecord};
use autodidact_rs_search::WebSearcher;
use autodidact_rs_server::{AppState, router};
use autodidact_rs_store::DocumentStore;
use autodidact_rs_test_utils::{FailingStore, MemoryStore};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

const BOUNDARY: &str = "autodidact-test-boundary";

struct Harness {
    app: Router,
    store: Arc<MemoryStore>,
    temp: TempDir,
}

/// Offline app over a temp dir; `sources` are written there and scanned.
fn harness(sources: &[(&str, &str)]) -> Harness {
    let temp = tempdir().expect("tempdir");
    let files = sources
        .iter()
        .map(|(name, content)| {
            let path = temp.path().join(name);
            std::fs::write(&path, content).expect("write source");
            path
        })
        .collect();
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone(), temp.path(), files);
    Harness {
        app,
        store,
        temp,
    }
}

fn app_with(
    store: Arc<dyn DocumentStore>,
    root: &Path,
    files: Vec<std::path::PathBuf>,
) -> Router {
    let assistant =
        Assistant::new(WebSearcher::offline(), &AnalysisConfig { files }).expect("assistant");
    router(Arc::new(AppState::new(assistant, store, root.join("uploads"))))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn multipart(field: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::post("/api/upload-knowledge")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn root_reports_active() {
    let h = harness(&[]);
    let (status, body) = send(&h.app, get("/api/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Самомодифицирующийся ИИ запущен!", "status": "active" })
    );
}

#[tokio::test]
async fn chat_returns_all_fields_and_persists_both_sides() {
    let h = harness(&[("App.css", "body {}")]);
    let (status, body) = send(&h.app, post_json("/api/chat", json!({ "message": "Привет" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().expect("response").starts_with("Привет!"));
    assert!(body["timestamp"].is_string());
    assert_eq!(body["improvements"], json!(["Добавить CSS переменные"]));
    assert_eq!(body["knowledge_gained"], json!([]));

    let messages = h.store.messages();
    assert_eq!(messages.len(), 2);
    assert!(matches!(&messages[0], MessageRecord::User { user_message, .. } if user_message == "Привет"));
    assert!(matches!(&messages[1], MessageRecord::Ai { .. }));
}

#[tokio::test]
async fn chat_with_fallback_reports_knowledge() {
    let h = harness(&[]);
    let (_, body) = send(
        &h.app,
        post_json("/api/chat", json!({ "message": "FastAPI tips", "timestamp": "x" })),
    )
    .await;
    assert_eq!(
        body["knowledge_gained"],
        json!(["dependencies", "async", "validation", "middleware"])
    );
}

#[tokio::test]
async fn malformed_chat_body_is_a_client_error() {
    let h = harness(&[]);
    let (status, _) = send(&h.app, post_json("/api/chat", json!({ "text": "hi" }))).await;
    assert!(status.is_client_error(), "{status}");
}

#[tokio::test]
async fn search_uses_fallback_offline() {
    let h = harness(&[]);
    let (status, body) = send(&h.app, post_json("/api/search", json!({ "query": "Python" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["results"][0]["url"], json!("internal://knowledge/python"));
}

#[tokio::test]
async fn analyze_reports_findings() {
    let h = harness(&[("server.py", "def run():\n    pass\n"), ("App.js", "var a = 1;")]);
    let (status, body) = send(&h.app, get("/api/analyze")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "files_analyzed": 2,
            "potential_improvements": [
                "Добавить асинхронные функции",
                "Добавить type hints",
                "Заменить var на const/let",
            ],
            "patterns_found": [],
            "suggestions": [],
        })
    );
}

#[tokio::test]
async fn improve_without_findings_is_unsuccessful() {
    let h = harness(&[]);
    let (status, body) = send(
        &h.app,
        Request::post("/api/improve").body(Body::empty()).expect("request"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Применено улучшений: 0, ошибок: 0",
            "details": { "applied": [], "errors": [] },
        })
    );
    assert_eq!(h.store.improvements().len(), 1);
}

#[tokio::test]
async fn improve_applies_every_finding() {
    let h = harness(&[("server.py", "def run():\n    pass\n"), ("App.css", "a {}")]);
    let (_, body) = send(
        &h.app,
        Request::post("/api/improve").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Применено улучшений: 3, ошибок: 0"));

    let records = h.store.improvements();
    assert_eq!(records[0].analysis.files_analyzed, 2);
}

#[tokio::test]
async fn history_returns_newest_fifty() {
    let h = harness(&[]);
    for idx in 0..60 {
        h.store
            .insert_message(MessageRecord::User {
                user_message: format!("m{idx}"),
                timestamp: format!("2026-01-01T00:{:02}:00.000000Z", idx),
            })
            .await
            .expect("insert");
    }

    let (status, body) = send(&h.app, get("/api/history")).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), 50);
    assert_eq!(messages[0]["user_message"], json!("m59"));
    assert_eq!(messages[0]["type"], json!("user"));
    assert_eq!(messages[49]["user_message"], json!("m10"));
}

#[tokio::test]
async fn improvements_history_returns_newest_twenty() {
    let h = harness(&[]);
    for idx in 0..25 {
        let mut record: ImprovementRecord = serde_json::from_value(json!({
            "timestamp": "",
            "success": false,
            "message": "Применено улучшений: 0, ошибок: 0",
            "applied": [],
            "errors": [],
            "analysis": {
                "files_analyzed": 0,
                "potential_improvements": [],
                "patterns_found": [],
                "suggestions": [],
            },
        }))
        .expect("record");
        record.timestamp = format!("2026-01-01T00:00:{idx:02}.000000Z");
        h.store.insert_improvement(record).await.expect("insert");
    }

    let (_, body) = send(&h.app, get("/api/improvements-history")).await;
    let improvements = body["improvements"].as_array().expect("improvements");
    assert_eq!(improvements.len(), 20);
    assert_eq!(
        improvements[0]["timestamp"],
        json!("2026-01-01T00:00:24.000000Z")
    );
}

#[tokio::test]
async fn upload_extracts_python_modules() {
    let h = harness(&[]);
    let (status, body) = send(
        &h.app,
        multipart("file", "test_upload.py", "import os\nimport sys\n\ndef main():\n    pass\n"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        json!("Файл test_upload.py успешно загружен и проанализирован")
    );
    assert!(body["knowledge_extracted"].as_u64().expect("count") >= 2);

    let records = h.store.knowledge();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].filename, "test_upload.py");
    assert!(records[0].knowledge.contains(&"Python модуль: os".to_string()));
    assert!(records[0].knowledge.contains(&"Python модуль: sys".to_string()));
}

#[tokio::test]
async fn upload_does_not_leave_files_behind() {
    let h = harness(&[]);
    let (status, _) = send(&h.app, multipart("file", "../../escape.md", "hello world")).await;
    assert_eq!(status, StatusCode::OK);

    let uploads = h.temp.path().join("uploads");
    let leftover = std::fs::read_dir(&uploads).expect("uploads dir").count();
    assert_eq!(leftover, 0);
    assert!(!h.temp.path().join("escape.md").exists());
}

#[tokio::test]
async fn upload_without_file_field_fails() {
    let h = harness(&[]);
    let (status, body) = send(&h.app, multipart("attachment", "a.py", "import os")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        json!("Ошибка загрузки файла: missing multipart field: file")
    );
}

#[tokio::test]
async fn store_failures_map_to_localized_500() {
    let temp = tempdir().expect("tempdir");
    let app = app_with(Arc::new(FailingStore), temp.path(), Vec::new());

    let cases = [
        (post_json("/api/chat", json!({ "message": "hi" })), "Ошибка обработки сообщения: "),
        (get("/api/history"), "Ошибка получения истории: "),
        (get("/api/improvements-history"), "Ошибка получения истории улучшений: "),
        (
            Request::post("/api/improve").body(Body::empty()).expect("request"),
            "Ошибка применения улучшений: ",
        ),
        (multipart("file", "a.txt", "words"), "Ошибка загрузки файла: "),
    ];
    for (request, prefix) in cases {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().expect("detail");
        assert!(detail.starts_with(prefix), "{detail}");
        assert!(detail.ends_with("store unavailable: store offline"), "{detail}");
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let h = harness(&[]);
    let request = Request::get("/api/")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .expect("request");
    let response = h.app.clone().oneshot(request).await.expect("response");
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
