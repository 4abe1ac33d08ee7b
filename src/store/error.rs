//! Error types for flight store operations.

use std::time::Duration;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for calls against the flight record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure (connection refused, DNS, TLS, broken pipe).
    /// Typically transient.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success HTTP status.
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response arrived but its body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The call did not complete within the configured bound.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Whether retrying the same call can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Transport(_) | StoreError::Timeout(_) => true,
            StoreError::Status { status, .. } => *status >= 500,
            StoreError::Decode(_) => false,
        }
    }
}

#[cfg(feature = "http-store")]
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured bound here.
            StoreError::Timeout(Duration::ZERO)
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}
