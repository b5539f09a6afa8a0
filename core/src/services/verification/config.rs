//! Configuration for the verification service

use crate::domain::entities::otp::{CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Number of minutes before a code expires
    pub code_ttl_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
        }
    }
}
