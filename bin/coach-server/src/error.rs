//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! **Security note:** upstream (LLM) and internal errors are logged with full
//! detail but only a fixed message is returned to the caller, so provider
//! error text, SQL, or secrets never leak to clients.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const LLM_UNAVAILABLE_MESSAGE: &str =
    "AI service is temporarily unavailable. Please try again.";
pub const INTERNAL_MESSAGE: &str =
    "An error occurred while processing your request. Please try again.";

/// All errors that can occur in the coach-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent invalid input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller referenced a session that has no history.
    #[error("not found: {0}")]
    NotFound(String),

    /// The completion provider failed.
    #[error("llm error: {0}")]
    Llm(#[from] coach_llm::LlmError),

    /// The request body exceeded the configured limit, in bytes.
    #[error("request body larger than {0} bytes")]
    PayloadTooLarge(usize),

    /// Propagated from the SQLite store.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body is too large (max {limit} bytes)."),
            ),

            // Upstream and internal errors: log the detail, return a fixed message.
            ServerError::Llm(e) => {
                error!(error = %e, "completion request failed");
                (StatusCode::SERVICE_UNAVAILABLE, LLM_UNAVAILABLE_MESSAGE.to_owned())
            }
            ServerError::Storage(e) => {
                error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_owned())
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_owned())
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

/// Malformed or mismatched JSON bodies are client errors with the usual
/// `{"error": ...}` body.
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation(rejection.body_text())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: ServerError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_message_is_exposed() {
        let (status, body) = body_of(ServerError::Validation("Message cannot be empty.".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message cannot be empty.");
    }

    #[tokio::test]
    async fn llm_error_text_is_hidden() {
        let err = ServerError::Llm(coach_llm::LlmError::Api {
            status: 401,
            message: "Invalid API Key gsk_abc".into(),
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], LLM_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let (status, body) = body_of(ServerError::PayloadTooLarge(1024)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].as_str().unwrap().contains("1024"));
    }

    #[tokio::test]
    async fn internal_detail_is_hidden() {
        let (status, body) = body_of(ServerError::Internal("disk on fire at /var/db".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }
}
