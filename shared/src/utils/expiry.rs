//! Expiry timestamp helpers
//!
//! The validity window is supplied by the caller; it is a deployment
//! configuration value rather than a protocol constant. Expiry is inclusive:
//! a timestamp equal to "now" counts as already expired.

use chrono::{DateTime, Duration, Utc};

/// Compute the expiry timestamp for a challenge issued now.
pub fn issue_expiry(validity_minutes: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(validity_minutes)
}

/// Whether `expires_at` has passed, judged against the wall clock.
pub fn is_expired(expires_at: DateTime<Utc>) -> bool {
    is_expired_at(expires_at, Utc::now())
}

/// Pure form of [`is_expired`]: true iff `now` is at or after `expires_at`.
pub fn is_expired_at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}
