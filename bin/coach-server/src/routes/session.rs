//! `GET /api/sessions/{session_id}/messages`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::TurnStore;
use crate::error::ServerError;
use crate::schemas::session::TurnResponse;
use crate::services::chat::validate_session_id;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_session_messages), components(schemas(TurnResponse)))]
pub struct SessionApi;

/// Register session routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sessions/{session_id}/messages", get(list_session_messages))
}

/// Stored turns of a session, oldest first. Unknown sessions yield `[]`.
#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}/messages",
    tag = "sessions",
    params(("session_id" = String, Path, description = "Client-chosen session id")),
    responses(
        (status = 200, description = "Turns in chronological order", body = [TurnResponse]),
        (status = 400, description = "Blank session id"),
        (status = 500, description = "Storage failure"),
    )
)]
pub async fn list_session_messages(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<TurnResponse>>, ServerError> {
    validate_session_id(&session_id)?;
    let turns = state.store.list_by_session(&session_id).await?;
    Ok(Json(turns.iter().map(|t| t.to_response()).collect()))
}
