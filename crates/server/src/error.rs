//! Application-level errors for the HTTP shell.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recommender::RecommendError;
use serde_json::json;

/// Errors surfaced at the request boundary.
///
/// Per-request failures map to 4xx/5xx responses; the process keeps
/// serving. Startup failures (store or model load) never reach this type,
/// they abort in `main` before the router exists.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            // An unknown seed title is the caller's "no recommendation
            // available" case, not a server fault.
            AppError::Recommend(RecommendError::TitleNotFound(_)) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::Recommend(RecommendError::EmptyResult) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
