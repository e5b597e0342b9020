//! Career plan export: pick the latest assistant turn and render it.

use std::sync::Arc;

use coach_render::{Artifact, DEFAULT_TITLE};
use tracing::{error, info};

use crate::entities::{ChatTurn, TurnRole, TurnStore};
use crate::error::ServerError;
use crate::services::chat::validate_session_id;
use crate::state::AppState;

/// Goal label used when the session has no user turn.
pub const NO_GOAL: &str = "Not specified";

/// What gets rendered for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSource {
    pub body: String,
    pub goal: String,
}

/// Latest assistant turn as the body, first user turn as the goal.
pub fn plan_from_turns(turns: &[ChatTurn]) -> Result<PlanSource, ServerError> {
    if turns.is_empty() {
        return Err(ServerError::NotFound(
            "No chat history found for this session".into(),
        ));
    }

    let body = turns
        .iter()
        .rev()
        .find(|t| t.role == TurnRole::Assistant)
        .map(|t| t.content.clone())
        .ok_or_else(|| ServerError::Validation("No AI response found in this session".into()))?;

    let goal = turns
        .iter()
        .find(|t| t.role == TurnRole::User)
        .map(|t| t.content.clone())
        .unwrap_or_else(|| NO_GOAL.to_owned());

    Ok(PlanSource { body, goal })
}

pub async fn export_session(state: &AppState, session_id: &str) -> Result<Artifact, ServerError> {
    validate_session_id(session_id)?;
    let turns = state.store.list_by_session(session_id).await?;
    let plan = plan_from_turns(&turns)?;
    info!(session_id, turns = turns.len(), "exporting career plan");
    Ok(render(state, DEFAULT_TITLE.to_owned(), plan.body, plan.goal).await)
}

pub async fn export_content(
    state: &AppState,
    content: String,
    title: Option<String>,
) -> Result<Artifact, ServerError> {
    if content.trim().is_empty() {
        return Err(ServerError::Validation("No content available to export.".into()));
    }
    let title = title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned());
    Ok(render(state, title, content, String::new()).await)
}

/// Render on the blocking pool. A panicked render still yields a fallback.
async fn render(state: &AppState, title: String, body: String, goal: String) -> Artifact {
    let renderer = Arc::clone(&state.renderer);
    let fallback_body = body.clone();
    match tokio::task::spawn_blocking(move || renderer.render(&title, &body, &goal)).await {
        Ok(artifact) => artifact,
        Err(e) => {
            error!(error = %e, "render task failed");
            Artifact::fallback(&e.to_string(), &fallback_body)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
