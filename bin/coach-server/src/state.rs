//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use coach_llm::CompletionClient;
use coach_render::Renderer;

use crate::config::Config;
use crate::entities::SqliteStore;
use crate::prompts::PromptSet;

/// State shared across all HTTP handlers. Built once in `main`, read-only
/// afterwards.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Conversation turn store.
    pub store: Arc<SqliteStore>,
    /// Completion provider.
    pub llm: Arc<dyn CompletionClient>,
    /// English / Hindi system prompts.
    pub prompts: Arc<PromptSet>,
    /// Career plan document renderer.
    pub renderer: Arc<Renderer>,
}
