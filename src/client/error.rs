use thiserror::Error;

/// Errors surfaced by the client to the screen that issued an operation.
///
/// The type is `Clone` so it can ride inside GUI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    NetworkFailure(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    HttpError { status: u16, message: String },
    /// Input rejected locally, before any request was issued.
    #[error("{0}")]
    ValidationError(String),
    /// An authenticated action was attempted without a session token.
    #[error("You need to log in first")]
    AuthRequired,
    /// The server answered 2xx but the body could not be decoded.
    #[error("Unexpected server response: {0}")]
    InvalidResponse(String),
    /// The durable session store could not be read or written.
    #[error("Session storage failure: {0}")]
    Storage(String),
    /// The meeting could not be launched.
    #[error("Could not open the meeting: {0}")]
    Conference(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::ValidationError(message.into())
    }

    /// Builds an HTTP error from a status code and an optional response body.
    ///
    /// The body's `message` field is preferred, then `error`; otherwise the
    /// message is synthesized from the status code.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "error"].iter().find_map(|key| {
                    v.get(*key)
                        .and_then(|m| m.as_str())
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                })
            });
        let message = parsed.unwrap_or_else(|| format!("Request failed with status {}", status));
        ClientError::HttpError { status, message }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
