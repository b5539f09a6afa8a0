//! Shared utilities for the account verification services
//!
//! This crate provides cross-cutting functionality used by the core crate:
//! - One-time code generation
//! - Expiry timestamp computation and evaluation
//! - Phone number masking for log output

pub mod utils;

// Re-export commonly used items at crate root
pub use utils::{code, expiry, phone};
