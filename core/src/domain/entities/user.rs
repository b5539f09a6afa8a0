//! User entity as seen by the verification core.
//!
//! The account subsystem owns the full user record; this core only reads the
//! delivery phone number and mutates the two verification-related flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity with the fields the verification flows touch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Phone number one-time codes are delivered to
    pub phone: String,

    /// Whether the phone number has been confirmed via a one-time code
    pub is_phone_verified: bool,

    /// Whether two-factor authentication is currently enabled
    pub two_fa: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with an unverified phone and 2FA off
    pub fn new(phone: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            is_phone_verified: false,
            two_fa: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the phone number as verified
    pub fn mark_phone_verified(&mut self) {
        self.is_phone_verified = true;
        self.updated_at = Utc::now();
    }

    /// Enables two-factor authentication
    pub fn enable_two_fa(&mut self) {
        self.two_fa = true;
        self.updated_at = Utc::now();
    }

    /// Disables two-factor authentication
    pub fn disable_two_fa(&mut self) {
        self.two_fa = false;
        self.updated_at = Utc::now();
    }
}
