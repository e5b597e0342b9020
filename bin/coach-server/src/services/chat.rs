//! Chat turn flow: validate, detect language, fetch history, generate,
//! persist.
//!
//! No turn is written until the completion has succeeded, and the user /
//! assistant pair is written in one transaction, so a failure at any step
//! leaves the session unchanged.

use chrono::Utc;
use coach_llm::{CompletionParams, CompletionRequest, ConversationMessage};
use tracing::{debug, info, warn};

use crate::entities::{ChatTurn, TurnRole, TurnStore};
use crate::error::ServerError;
use crate::prompts::Language;
use crate::state::AppState;

/// Maximum message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Number of most recent turns forwarded to the model.
pub const HISTORY_LIMIT: usize = 20;

pub fn validate_message(message: &str) -> Result<(), ServerError> {
    if message.trim().is_empty() {
        return Err(ServerError::Validation("Message cannot be empty.".into()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ServerError::Validation(format!(
            "Message is too long (max {MAX_MESSAGE_CHARS} characters)."
        )));
    }
    Ok(())
}

pub fn validate_session_id(session_id: &str) -> Result<(), ServerError> {
    if session_id.trim().is_empty() {
        return Err(ServerError::Validation("Session ID is required.".into()));
    }
    Ok(())
}

/// Keep the last `limit` items, preserving their order.
pub fn most_recent<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if items.len() > limit {
        let excess = items.len() - limit;
        items.drain(..excess);
    }
    items
}

/// Run one exchange for a stored session and persist both turns.
pub async fn reply_in_session(
    state: &AppState,
    session_id: &str,
    message: &str,
) -> Result<String, ServerError> {
    validate_message(message)?;
    validate_session_id(session_id)?;

    let language = Language::detect(message);

    let turns = state.store.list_by_session(session_id).await?;
    let total = turns.len();
    let history: Vec<ConversationMessage> = most_recent(turns, HISTORY_LIMIT)
        .iter()
        .map(ChatTurn::to_message)
        .collect();
    if total > history.len() {
        debug!(session_id, total, kept = history.len(), "truncated session history");
    }

    let reply = match generate(state, language, history, message).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(session_id, "completion failed; session left unchanged");
            return Err(e);
        }
    };

    let now = Utc::now();
    state
        .store
        .append_all(vec![
            ChatTurn::new(session_id, TurnRole::User, message, now),
            ChatTurn::new(session_id, TurnRole::Assistant, reply.as_str(), now),
        ])
        .await?;

    info!(session_id, ?language, reply_len = reply.len(), "chat turn persisted");
    Ok(reply)
}

/// Run one exchange against caller-supplied history. Nothing is persisted.
pub async fn reply_stateless(
    state: &AppState,
    history: Vec<ConversationMessage>,
    message: &str,
) -> Result<String, ServerError> {
    validate_message(message)?;
    let language = Language::detect(message);
    let history = most_recent(history, HISTORY_LIMIT);
    let reply = generate(state, language, history, message).await?;
    info!(?language, reply_len = reply.len(), "stateless chat turn completed");
    Ok(reply)
}

async fn generate(
    state: &AppState,
    language: Language,
    history: Vec<ConversationMessage>,
    message: &str,
) -> Result<String, ServerError> {
    let request = CompletionRequest {
        system_prompt: state.prompts.for_language(language).to_owned(),
        history,
        user_message: message.to_owned(),
        params: CompletionParams {
            temperature: state.config.llm_temperature,
            max_tokens: state.config.llm_max_tokens,
        },
    };
    Ok(state.llm.complete(request).await?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
