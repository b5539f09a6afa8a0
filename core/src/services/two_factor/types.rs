//! Types for two-factor state decisions

use crate::services::verification::ChallengeIssued;

/// Result of applying a desired 2FA state.
#[derive(Debug, Clone)]
pub enum TwoFactorUpdate {
    /// 2FA was turned on directly.
    Enabled,
    /// A disable challenge went out; the flag flips once it validates.
    DisableChallengeIssued(ChallengeIssued),
    /// The requested state was already in place.
    Unchanged,
}

/// Observable 2FA state, with the mid-flight disable made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoFactorState {
    /// 2FA is off.
    Disabled,
    /// 2FA is on with no live disable challenge.
    Enabled,
    /// 2FA is on and an unexpired disable challenge awaits validation.
    PendingDisable,
}
