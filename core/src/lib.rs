//! # Account Verification Core
//!
//! Core business logic and domain layer for the account verification flows.
//! This crate contains domain entities, the challenge services, repository
//! interfaces, and error types that form the foundation of the application
//! architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{MockOtpRepository, MockUserRepository, OtpRepository, UserRepository};
pub use services::*;
