//! Completion client used by the career coach server.
//!
//! [`CompletionClient`] is the seam the server depends on;
//! [`ChatCompletionsClient`] is the production implementation that talks to
//! any OpenAI-compatible chat-completions endpoint.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatCompletionsClient, CompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::LlmError;
pub use types::{CompletionParams, CompletionRequest, ConversationMessage, Role};
