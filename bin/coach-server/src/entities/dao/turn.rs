use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Author of a stored turn. System instructions are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl std::str::FromStr for TurnRole {
    type Err = String;

    /// Case-insensitive, so rows written by older clients still parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("user") {
            Ok(TurnRole::User)
        } else if s.eq_ignore_ascii_case("assistant") {
            Ok(TurnRole::Assistant)
        } else {
            Err(format!("unknown turn role '{s}'"))
        }
    }
}

impl From<TurnRole> for coach_llm::Role {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => coach_llm::Role::User,
            TurnRole::Assistant => coach_llm::Role::Assistant,
        }
    }
}

/// A single row in the `chat_history` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub id: String,
    pub session_id: String,
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(
        session_id: impl Into<String>,
        role: TurnRole,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn to_message(&self) -> coach_llm::ConversationMessage {
        coach_llm::ConversationMessage::new(self.role.into(), self.content.as_str())
    }
}
