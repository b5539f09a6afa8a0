//! Two-factor state controller module
//!
//! Decides whether enabling or disabling 2FA requires a verification
//! challenge and applies the resulting user mutation.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::TwoFactorService;
pub use types::{TwoFactorState, TwoFactorUpdate};
