//! Error types for trait operations.

use thiserror::Error;

/// Common error type for collaborator operations.
///
/// Per-ticker failures are not errors: a source drops the ticker from its
/// result. These variants describe total failure of a request.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Rate limited
    #[error("rate limited")]
    RateLimited,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<meridian_core::CoreError> for TraitError {
    fn from(e: meridian_core::CoreError) -> Self {
        TraitError::InvalidInput(e.to_string())
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::SourceNotAvailable(e.to_string())
    }
}
