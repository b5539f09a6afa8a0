//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::ChallengeError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Underlying persistence was unavailable; safe to retry upstream,
    /// never retried here.
    #[error("Storage failure: {message}")]
    Storage { message: String },

    // Bridge to challenge-flow errors
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
}

pub type DomainResult<T> = Result<T, DomainError>;
