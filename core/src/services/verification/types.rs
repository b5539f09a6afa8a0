//! Types for verification service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Outcome of an SMS dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The provider accepted the message
    Sent {
        /// The SMS message ID from the provider
        message_id: String,
    },
    /// The provider rejected or failed the message; the challenge stays live
    Failed {
        /// Provider-reported reason
        reason: String,
    },
}

impl DeliveryStatus {
    /// Whether the provider accepted the message
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent { .. })
    }
}

/// Acknowledgment of an issued challenge; never carries the code itself
#[derive(Debug, Clone)]
pub struct ChallengeIssued {
    /// Identifier of the stored OTP record
    pub otp_id: Uuid,
    /// When the code stops being valid
    pub expires_at: DateTime<Utc>,
    /// What happened to the SMS dispatch
    pub delivery: DeliveryStatus,
}

/// Result of requesting phone verification
#[derive(Debug, Clone)]
pub enum IssueOutcome {
    /// A new challenge was created and dispatch attempted
    Issued(ChallengeIssued),
    /// The phone is already verified; nothing was issued
    AlreadyVerified,
}

impl IssueOutcome {
    /// The challenge details, if one was issued
    pub fn challenge(&self) -> Option<&ChallengeIssued> {
        match self {
            IssueOutcome::Issued(challenge) => Some(challenge),
            IssueOutcome::AlreadyVerified => None,
        }
    }
}
