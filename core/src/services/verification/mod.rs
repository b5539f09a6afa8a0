//! Verification service module for one-time code challenges
//!
//! This module provides the complete verification code workflow:
//! - Code issuance and SMS dispatch for phone verification and 2FA-disable
//! - Single-use code validation with the matching user mutation
//! - Integration with user and OTP persistence plus an SMS collaborator

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use service::VerificationService;
pub use traits::SmsSender;
pub use types::{ChallengeIssued, DeliveryStatus, IssueOutcome};
