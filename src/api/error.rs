//! Transport error types for the mailing-list submitter

use thiserror::Error;

/// Errors raised by a [`super::RemoteSubmitter`] before any classified
/// response is available
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("invalid action url '{url}': {reason}")]
    InvalidActionUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed JSONP response: {0}")]
    MalformedJsonp(String),

    #[error("JSONP callback mismatch: expected '{expected}', found '{found}'")]
    CallbackMismatch { expected: String, found: String },

    #[error("invalid response payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl SubmitError {
    pub fn network(message: impl Into<String>) -> Self {
        SubmitError::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        SubmitError::MalformedJsonp(message.into())
    }

    /// Whether the request may have reached the provider at all
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            SubmitError::Network(_) | SubmitError::Client(_) | SubmitError::InvalidActionUrl { .. }
        )
    }
}
