use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A prior message supplied by a stateless client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryMessage {
    /// `"user"`, `"assistant"` or `"system"`.
    pub role: String,
    pub content: String,
}

/// Request body for `POST /api/chat`.
///
/// Clients either name a stored session or carry their own history. A body
/// with both is a session request and its `history` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ChatRequest {
    /// History loaded from and appended to the session store.
    Session { session_id: String, message: String },
    /// History kept by the client; nothing is persisted.
    Stateless {
        history: Vec<HistoryMessage>,
        message: String,
    },
    /// Neither a session id nor a history. Always rejected.
    MissingSession { message: String },
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}
