use thiserror::Error;

/// Errors returned by a completion round trip.
///
/// Diagnostics never contain the API key, and transport errors are stripped
/// of their request URL before being wrapped.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON shape.
    #[error("invalid completion response: {0}")]
    Decode(String),

    /// The provider returned no choices or an empty message.
    #[error("completion response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::Decode(e.without_url().to_string())
        } else {
            LlmError::Transport(e.without_url().to_string())
        }
    }
}
