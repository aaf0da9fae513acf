use std::time::Duration;

use thiserror::Error;

/// Failure reported by a remote listing or detail source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("rejected by upstream (code {code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SourceError::Transport(Box::new(err))
    }
}
