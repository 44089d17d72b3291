use thiserror::Error;

/// Errors from the chat-completion endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("model returned no choices")]
    EmptyResponse,

    #[error("model API key is not configured")]
    MissingApiKey,

    #[error("invalid model settings: {0}")]
    Settings(String),
}
