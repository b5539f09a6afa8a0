//! One-time password record issued for a verification challenge.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use account_shared::utils::expiry;

/// Length of a one-time code in digits
pub const CODE_LENGTH: usize = 6;

/// Default validity window for one-time codes (5 minutes)
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 5;

/// Why an OTP was issued; validation only matches within the same use case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtpUseCase {
    /// Confirming ownership of the phone number on the account
    #[serde(rename = "PHV")]
    PhoneVerification,
    /// Confirming a request to disable two-factor authentication
    #[serde(rename = "D2FA")]
    DisableTwoFa,
}

impl OtpUseCase {
    /// The persisted tag for this use case
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpUseCase::PhoneVerification => "PHV",
            OtpUseCase::DisableTwoFa => "D2FA",
        }
    }
}

impl fmt::Display for OtpUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored one-time password awaiting validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// The user this code was issued to
    pub user_id: Uuid,

    /// The numeric code itself
    pub code: String,

    /// The challenge this code belongs to
    pub use_case: OtpUseCase,

    /// Timestamp at and after which the code can no longer validate
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a new record for a freshly generated code
    pub fn new(user_id: Uuid, code: String, use_case: OtpUseCase, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            code,
            use_case,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Whether the record is past its validity window
    pub fn is_expired(&self) -> bool {
        expiry::is_expired(self.expires_at)
    }
}
