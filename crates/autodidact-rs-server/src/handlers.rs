//! Request handlers for the `/api` routes.
//!
//! Each handler maps store and upload failures to an [`ApiError`] tagged with
//! its endpoint, so the response detail carries the endpoint's prefix.

use crate::error::{ApiError, ApiResult, Endpoint, Failure};
use crate::state::AppState;
use crate::uploads;
use autodidact_rs_protocol::{
    ChatRequest, ChatResponse, CodeAnalysis, HistoryResponse, ImprovementOutcome,
    ImprovementRecord, ImprovementsHistoryResponse, KnowledgeRecord, MessageRecord,
    SearchRequest, SearchResponse, StatusResponse, UploadResponse, now_timestamp,
};
use autodidact_rs_store::{IMPROVEMENT_HISTORY_LIMIT, MESSAGE_HISTORY_LIMIT};
use axum::Json;
use axum::extract::{Multipart, State};
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

type AppStateRef = State<Arc<AppState>>;

pub(crate) async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Самомодифицирующийся ИИ запущен!".to_string(),
        status: "active".to_string(),
    })
}

/// Persist the user message, compose a reply, then persist the reply.
pub(crate) async fn chat(
    State(state): AppStateRef,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    state
        .store
        .insert_message(MessageRecord::user(request.message.clone()))
        .await
        .map_err(ApiError::at(Endpoint::Chat))?;

    let reply = state.assistant.generate_response(&request.message).await;

    state
        .store
        .insert_message(MessageRecord::ai(&reply))
        .await
        .map_err(ApiError::at(Endpoint::Chat))?;
    Ok(Json(reply))
}

pub(crate) async fn search(
    State(state): AppStateRef,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let results = state
        .assistant
        .search(&request.query, request.limit())
        .await;
    debug!("search handled (results={})", results.len());
    Json(results.into())
}

pub(crate) async fn analyze(State(state): AppStateRef) -> Json<CodeAnalysis> {
    Json(state.assistant.analyze().await)
}

/// Apply every detected improvement and record the run.
pub(crate) async fn improve(State(state): AppStateRef) -> ApiResult<Json<ImprovementOutcome>> {
    let analysis = state.assistant.analyze().await;
    let outcome = state
        .assistant
        .apply_improvements(&analysis.potential_improvements);
    state
        .store
        .insert_improvement(ImprovementRecord::new(outcome.clone(), analysis))
        .await
        .map_err(ApiError::at(Endpoint::Improve))?;
    Ok(Json(outcome))
}

pub(crate) async fn history(State(state): AppStateRef) -> ApiResult<Json<HistoryResponse>> {
    let messages = state
        .store
        .recent_messages(MESSAGE_HISTORY_LIMIT)
        .await
        .map_err(ApiError::at(Endpoint::History))?;
    Ok(Json(HistoryResponse { messages }))
}

pub(crate) async fn improvements_history(
    State(state): AppStateRef,
) -> ApiResult<Json<ImprovementsHistoryResponse>> {
    let improvements = state
        .store
        .recent_improvements(IMPROVEMENT_HISTORY_LIMIT)
        .await
        .map_err(ApiError::at(Endpoint::ImprovementsHistory))?;
    Ok(Json(ImprovementsHistoryResponse { improvements }))
}

/// Stage the `file` field under an internal name, extract knowledge, and record it.
pub(crate) async fn upload_knowledge(
    State(state): AppStateRef,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let (filename, bytes) = loop {
        let Some(field) = multipart
            .next_field()
            .await
            .map_err(ApiError::at(Endpoint::Upload))?
        else {
            return Err(ApiError::new(Endpoint::Upload, Failure::MissingFile));
        };
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(ApiError::at(Endpoint::Upload))?;
        break (filename, bytes);
    };

    let id = Uuid::new_v4();
    let path = uploads::stage(&state.uploads_dir, id, &filename, &bytes)
        .await
        .map_err(ApiError::at(Endpoint::Upload))?;
    let knowledge = state.assistant.extract_knowledge(&path).await;
    uploads::discard(&path).await;

    let knowledge_extracted = knowledge.len();
    state
        .store
        .insert_knowledge(KnowledgeRecord {
            id,
            filename: filename.clone(),
            timestamp: now_timestamp(),
            knowledge,
            size: bytes.len() as u64,
        })
        .await
        .map_err(ApiError::at(Endpoint::Upload))?;
    info!(
        "upload processed (id={}, size={}, knowledge={})",
        id,
        bytes.len(),
        knowledge_extracted
    );

    Ok(Json(UploadResponse {
        message: format!("Файл {filename} успешно загружен и проанализирован"),
        knowledge_extracted,
    }))
}
