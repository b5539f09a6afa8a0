//! Common utility functions

pub mod code;
pub mod expiry;
pub mod phone;

// Re-export commonly used utilities
pub use code::*;
pub use expiry::*;
pub use phone::*;
