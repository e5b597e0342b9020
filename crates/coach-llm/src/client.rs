//! HTTP client for OpenAI-compatible `/chat/completions` endpoints (Groq by
//! default).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{CompletionRequest, ConversationMessage};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// A single-attempt, non-streaming completion backend.
///
/// Implementations must not retry; the caller sees exactly one round trip.
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Chat-completions client over `reqwest`.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ChatCompletionsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: None,
        }
    }

    /// Override the endpoint base, e.g. `https://api.openai.com/v1`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: request.messages(),
            temperature: request.params.temperature,
            max_tokens: request.params.max_tokens,
        };

        debug!(
            model = %self.model,
            messages = body.messages.len(),
            max_tokens = body.max_tokens,
            "sending completion request"
        );

        let mut req = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req.send().await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| truncate(&text, 256));
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(LlmError::Api { status: status.as_u16(), message });
        }

        let parsed: ChatCompletionResponse = res.json().await?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_owned())
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        debug!(reply_len = reply.len(), "completion received");
        Ok(reply)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ConversationMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{CompletionParams, ConversationMessage};
    use mockito::Matcher;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: "coach".into(),
            history: vec![ConversationMessage::assistant("earlier reply")],
            user_message: "roadmap please".into(),
            params: CompletionParams { temperature: 0.6, max_tokens: 800 },
        }
    }

    #[tokio::test]
    async fn complete_returns_trimmed_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test_key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "max_tokens": 800,
                "messages": [
                    {"role": "system", "content": "coach"},
                    {"role": "assistant", "content": "earlier reply"},
                    {"role": "user", "content": "roadmap please"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  Month 1: basics \n"}}]}"#)
            .create_async()
            .await;

        let client = ChatCompletionsClient::new("test_key")
            .with_base_url(server.url())
            .with_model("test-model");

        let reply = client.complete(request()).await.expect("completion");
        assert_eq!(reply, "Month 1: basics");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_carries_status_and_provider_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#)
            .create_async()
            .await;

        let client = ChatCompletionsClient::new("bad_key").with_base_url(server.url());
        let err = client.complete(request()).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = ChatCompletionsClient::new("k").with_base_url(server.url());
        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn exactly_one_attempt_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .expect(1)
            .create_async()
            .await;

        let client = ChatCompletionsClient::new("k").with_base_url(server.url());
        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
        mock.assert_async().await;
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let client = ChatCompletionsClient::new("sk-super-secret");
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("sk-super-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ChatCompletionsClient::new("k").with_base_url("http://localhost:9/v1/");
        assert_eq!(client.base_url(), "http://localhost:9/v1");
    }
}
