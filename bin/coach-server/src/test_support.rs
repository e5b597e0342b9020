//! Shared fixtures for handler and service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coach_llm::{CompletionClient, CompletionRequest, LlmError};
use coach_render::Renderer;

use crate::config::Config;
use crate::entities::SqliteStore;
use crate::prompts::PromptSet;
use crate::state::AppState;

/// Completion client that records every request and answers from a script.
#[derive(Debug)]
pub struct ScriptedLlm {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: Some(reply.to_owned()), requests: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: None, requests: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Api {
                status: 500,
                message: "scripted provider failure".into(),
            }),
        }
    }
}

/// Font directory shipped at the workspace root.
pub const FONT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fonts");

/// In-memory database, no fonts (renders fall back to text), scripted LLM.
pub async fn test_state(llm: Arc<ScriptedLlm>) -> Arc<AppState> {
    state_with_fonts(llm, "/nonexistent/coach-fonts").await
}

/// Like [`test_state`] but with the bundled fonts, so exports are real PDFs.
pub async fn pdf_test_state(llm: Arc<ScriptedLlm>) -> Arc<AppState> {
    state_with_fonts(llm, FONT_DIR).await
}

async fn state_with_fonts(llm: Arc<ScriptedLlm>, font_dir: &str) -> Arc<AppState> {
    let config = Config::from_source(|key| match key {
        "GROQ_API_KEY" => Some("gsk_test_key".into()),
        "COACH_DATABASE_URL" => Some("sqlite::memory:".into()),
        "COACH_FONT_DIR" => Some(font_dir.to_owned()),
        _ => None,
    })
    .expect("test config");

    let store = SqliteStore::connect(&config.database_url)
        .await
        .expect("in-memory store");
    let renderer = Renderer::new(config.font_dir.clone(), config.font_family.clone());

    Arc::new(AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        llm,
        prompts: Arc::new(PromptSet::default()),
        renderer: Arc::new(renderer),
    })
}
