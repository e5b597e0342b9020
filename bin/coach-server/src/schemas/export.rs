use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/export-pdf`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ExportRequest {
    /// Render caller-supplied text directly.
    Content {
        content: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        filename: Option<String>,
    },
    /// Render the latest assistant turn of a stored session.
    Session {
        #[serde(default)]
        session_id: String,
    },
}
