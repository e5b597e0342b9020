//! `POST /api/chat`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use coach_llm::{ConversationMessage, Role};
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::chat::{ChatRequest, ChatResponse, HistoryMessage};
use crate::services::chat;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat_with_coach),
    components(schemas(ChatRequest, ChatResponse, HistoryMessage))
)]
pub struct ChatApi;

/// Register chat routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat_with_coach))
}

/// Send one message to the career coach.
///
/// With `session_id` the conversation is loaded from and saved to the
/// database, even when `history` is also sent. With only `history` the
/// caller's messages are used and nothing is stored.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Coach reply", body = ChatResponse),
        (status = 400, description = "Empty or oversized message, or missing session id"),
        (status = 500, description = "Storage or internal failure"),
        (status = 503, description = "AI service unavailable"),
    )
)]
pub async fn chat_with_coach(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload?;
    let reply = match req {
        ChatRequest::Session { session_id, message } => {
            debug!(session_id = %session_id, message_len = message.len(), "chat request");
            chat::reply_in_session(&state, &session_id, &message).await?
        }
        ChatRequest::Stateless { history, message } => {
            debug!(history = history.len(), message_len = message.len(), "stateless chat request");
            let history = history
                .into_iter()
                .map(to_conversation_message)
                .collect::<Result<Vec<_>, _>>()?;
            chat::reply_stateless(&state, history, &message).await?
        }
        // An empty session id fails validation after the message is checked.
        ChatRequest::MissingSession { message } => {
            chat::reply_in_session(&state, "", &message).await?
        }
    };
    Ok(Json(ChatResponse { reply }))
}

fn to_conversation_message(msg: HistoryMessage) -> Result<ConversationMessage, ServerError> {
    let role = match msg.role.to_ascii_lowercase().as_str() {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        "system" => Role::System,
        other => {
            return Err(ServerError::Validation(format!(
                "Unknown history role '{other}'."
            )))
        }
    };
    Ok(ConversationMessage::new(role, msg.content))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
