//! Two-factor state controller implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::otp::OtpUseCase;
use crate::errors::{ChallengeError, DomainResult};
use crate::repositories::{OtpRepository, UserRepository};
use crate::services::verification::{SmsSender, VerificationService};

use super::types::{TwoFactorState, TwoFactorUpdate};

/// Controller deciding whether a 2FA toggle needs a verification challenge.
///
/// Enabling is trusted and mutates the user directly. Disabling requires
/// proof of phone possession, so the controller only issues a challenge and
/// leaves the actual flip to the validate flow.
pub struct TwoFactorService<U: UserRepository, O: OtpRepository, S: SmsSender> {
    user_repository: Arc<U>,
    otp_repository: Arc<O>,
    verification_service: Arc<VerificationService<U, O, S>>,
}

impl<U: UserRepository, O: OtpRepository, S: SmsSender> TwoFactorService<U, O, S> {
    /// Create a new two-factor controller.
    ///
    /// # Arguments
    /// * `user_repository` - User persistence
    /// * `otp_repository` - Challenge record persistence
    /// * `verification_service` - Issues and validates disable challenges
    pub fn new(
        user_repository: Arc<U>,
        otp_repository: Arc<O>,
        verification_service: Arc<VerificationService<U, O, S>>,
    ) -> Self {
        Self {
            user_repository,
            otp_repository,
            verification_service,
        }
    }

    /// Apply a desired 2FA state to a user.
    ///
    /// This method:
    /// 1. Loads the user
    /// 2. Succeeds without side effects when the state already matches
    /// 3. On disable requests, issues a challenge instead of mutating
    /// 4. On enable requests, flips the flag immediately
    ///
    /// # Arguments
    /// * `user_id` - The user whose 2FA setting is changing
    /// * `desired` - The requested 2FA state
    ///
    /// # Returns
    /// * `Ok(TwoFactorUpdate)` - What actually happened
    /// * `Err(DomainError)` - Unknown user or storage failure
    pub async fn set_two_fa(&self, user_id: Uuid, desired: bool) -> DomainResult<TwoFactorUpdate> {
        // 1. Load the user
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ChallengeError::UserNotFound)?;

        // 2. Same state requested: no-op
        if user.two_fa == desired {
            return Ok(TwoFactorUpdate::Unchanged);
        }

        // 3. Disabling needs a validated challenge first
        if user.two_fa && !desired {
            let challenge = self
                .verification_service
                .send_two_fa_disable_challenge(user_id)
                .await?;

            tracing::info!(
                user_id = %user_id,
                otp_id = %challenge.otp_id,
                event = "two_fa_disable_requested",
                "2FA-disable challenge issued; flag unchanged until validated"
            );
            return Ok(TwoFactorUpdate::DisableChallengeIssued(challenge));
        }

        // 4. Enabling applies immediately
        user.enable_two_fa();
        self.user_repository.update(user).await?;

        tracing::info!(
            user_id = %user_id,
            event = "two_fa_enabled",
            "Two-factor authentication enabled"
        );
        Ok(TwoFactorUpdate::Enabled)
    }

    /// Report the derived 2FA state for a user.
    ///
    /// `PendingDisable` is not persisted anywhere. It holds exactly while an
    /// unexpired disable challenge exists for a user whose flag is still on.
    pub async fn two_fa_state(&self, user_id: Uuid) -> DomainResult<TwoFactorState> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ChallengeError::UserNotFound)?;

        if !user.two_fa {
            return Ok(TwoFactorState::Disabled);
        }

        let pending = self
            .otp_repository
            .find_for_use_case(user_id, OtpUseCase::DisableTwoFa)
            .await?
            .iter()
            .any(|record| !record.is_expired());

        if pending {
            Ok(TwoFactorState::PendingDisable)
        } else {
            Ok(TwoFactorState::Enabled)
        }
    }
}
