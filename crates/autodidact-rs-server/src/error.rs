//! Error mapping from handler failures to HTTP responses.

use autodidact_rs_protocol::ErrorBody;
use autodidact_rs_store::StoreError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

/// Endpoint a failure happened in; selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    Search,
    Analyze,
    Improve,
    History,
    ImprovementsHistory,
    Upload,
}

impl Endpoint {
    /// Localized prefix of the `detail` message.
    pub fn prefix(self) -> &'static str {
        match self {
            Endpoint::Chat => "Ошибка обработки сообщения",
            Endpoint::Search => "Ошибка поиска",
            Endpoint::Analyze => "Ошибка анализа",
            Endpoint::Improve => "Ошибка применения улучшений",
            Endpoint::History => "Ошибка получения истории",
            Endpoint::ImprovementsHistory => "Ошибка получения истории улучшений",
            Endpoint::Upload => "Ошибка загрузки файла",
        }
    }
}

/// Underlying cause of a handler failure.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    /// Multipart body has no `file` field.
    #[error("missing multipart field: file")]
    MissingFile,
}

/// Handler failure, rendered as `500 {"detail": "<prefix>: <cause>"}`.
#[derive(Debug, Error)]
#[error("{}: {failure}", .endpoint.prefix())]
pub struct ApiError {
    pub endpoint: Endpoint,
    pub failure: Failure,
}

impl ApiError {
    pub fn new(endpoint: Endpoint, failure: impl Into<Failure>) -> Self {
        Self {
            endpoint,
            failure: failure.into(),
        }
    }

    /// Adapter for `map_err` that tags any failure with `endpoint`.
    pub fn at<E: Into<Failure>>(endpoint: Endpoint) -> impl Fn(E) -> ApiError {
        move |err| ApiError::new(endpoint, err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        error!("request failed (endpoint={:?}): {}", self.endpoint, self.failure);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { detail }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
