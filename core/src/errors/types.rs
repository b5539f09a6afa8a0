//! Domain-specific error types for verification challenges
//!
//! These variants are what the request-handling layer maps onto client
//! responses; the wording here is for logs and diagnostics, not end users.

use thiserror::Error;

/// Failures of the verification challenge flows
#[derive(Error, Debug)]
pub enum ChallengeError {
    /// The referenced user does not exist. Rare, since the caller identity
    /// arrives pre-authenticated.
    #[error("User not found")]
    UserNotFound,

    /// No live code matches (user, use case, code). Deliberately covers
    /// wrong code, consumed code, wrong use case and wrong user alike.
    #[error("Invalid verification code")]
    InvalidVerificationCode,

    /// A matching code exists but its validity window has passed.
    #[error("Verification code expired")]
    VerificationCodeExpired,
}
