use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::ChatTurn;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TurnResponse {
    pub id: String,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

impl ChatTurn {
    pub fn to_response(&self) -> TurnResponse {
        TurnResponse {
            id: self.id.clone(),
            session_id: self.session_id.clone(),
            role: self.role.as_str().to_owned(),
            content: self.content.clone(),
            timestamp: self.timestamp.to_rfc3339(),
        }
    }
}
