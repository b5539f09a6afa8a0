//! Business services containing domain logic and use cases.

pub mod two_factor;
pub mod verification;

// Re-export commonly used types
pub use two_factor::{TwoFactorService, TwoFactorState, TwoFactorUpdate};
pub use verification::{
    ChallengeIssued, DeliveryStatus, IssueOutcome, SmsSender, VerificationConfig,
    VerificationService,
};
