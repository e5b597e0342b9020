//! `POST /api/export-pdf`.

use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use coach_render::ArtifactKind;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::export::ExportRequest;
use crate::services::export;
use crate::state::AppState;

/// Attachment name used when the caller does not supply one.
pub const DEFAULT_FILE_STEM: &str = "career_plan";

#[derive(OpenApi)]
#[openapi(paths(export_pdf), components(schemas(ExportRequest)))]
pub struct ExportApi;

/// Register export routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/export-pdf", post(export_pdf))
}

/// Download the career plan as a file.
///
/// The response is `application/pdf` when rendering succeeds. If the PDF
/// cannot be produced a `text/plain` file with the raw plan is returned
/// instead, still with status 200.
#[utoipa::path(
    post,
    path = "/api/export-pdf",
    tag = "export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "PDF (or plain-text fallback) attachment", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Missing session id, no AI response, or empty content"),
        (status = 404, description = "Session has no chat history"),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(req) = payload?;
    let (artifact, requested_name) = match req {
        ExportRequest::Session { session_id } => {
            (export::export_session(&state, &session_id).await?, None)
        }
        ExportRequest::Content { content, title, filename } => {
            (export::export_content(&state, content, title).await?, filename)
        }
    };

    let filename = attachment_name(requested_name.as_deref(), artifact.kind);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.kind.content_type().to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// `<stem>.<ext>` where the stem keeps only `[A-Za-z0-9._-]` and the
/// extension always matches the artifact.
fn attachment_name(requested: Option<&str>, kind: ArtifactKind) -> String {
    let stem = requested
        .and_then(|name| Path::new(name.trim()).file_stem())
        .and_then(|s| s.to_str())
        .map(|s| {
            s.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
                .collect::<String>()
        })
        .filter(|s| !s.trim_matches('.').is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_STEM.to_owned());
    format!("{stem}.{}", kind.extension())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
