//! Service error types for enrollment and recognition.

use thiserror::Error;

/// Errors that can occur while serving an enrollment or recognition
/// request.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The caller supplied unusable input (empty label, unreadable
    /// request). Not retriable as-is.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The embedding provider could not be reached or answered with a
    /// transport error, a non-2xx status, or an undecodable payload.
    #[error("embedding provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    /// The provider found no face in the supplied image. A failure for
    /// enrollment; a normal no-match outcome for recognition.
    #[error("no face detected in the supplied image")]
    NoFaceDetected,

    /// An error propagated from the gallery store or similarity engine.
    #[error(transparent)]
    Core(#[from] visage_core::Error),
}

impl MatchError {
    /// Returns `true` when the error is transient and the whole request
    /// may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. })
    }
}

/// Convenience alias for service results.
pub type MatchResult<T> = std::result::Result<T, MatchError>;
