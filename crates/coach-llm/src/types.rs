//! Provider-neutral message and request types.

use serde::{Deserialize, Serialize};

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the message list sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling parameters forwarded verbatim to the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self { temperature: 0.6, max_tokens: 800 }
    }
}

/// Everything needed for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub history: Vec<ConversationMessage>,
    pub user_message: String,
    pub params: CompletionParams,
}

impl CompletionRequest {
    /// Ordered message list: the system prompt, the history without any
    /// `system` entries, then the new user message.
    pub fn messages(&self) -> Vec<ConversationMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ConversationMessage::system(self.system_prompt.as_str()));
        messages.extend(
            self.history
                .iter()
                .filter(|m| m.role != Role::System)
                .cloned(),
        );
        messages.push(ConversationMessage::user(self.user_message.as_str()));
        messages
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
