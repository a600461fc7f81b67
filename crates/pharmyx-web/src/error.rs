//! API error type mapped onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use pharmyx_llm::LlmError;

/// Errors a handler can surface. Source retrieval never lands here: each
/// retrieval client degrades into its fallback outcome, so the only failure
/// that aborts a report request is the language-model call itself.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("report generation failed: {0}")]
    Report(#[from] LlmError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Report(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
