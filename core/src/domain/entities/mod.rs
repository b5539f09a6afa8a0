//! Domain entities representing core business objects.

pub mod otp;
pub mod user;

// Re-export commonly used types
pub use otp::{OtpRecord, OtpUseCase, CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES};
pub use user::User;
