//! Main verification service implementation

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use account_shared::utils::code::numeric_code;
use account_shared::utils::expiry::issue_expiry;
use account_shared::utils::phone::mask_phone;

use crate::domain::entities::otp::{OtpRecord, OtpUseCase};
use crate::domain::entities::user::User;
use crate::errors::{ChallengeError, DomainResult};
use crate::repositories::{OtpRepository, UserRepository};

use super::config::VerificationConfig;
use super::traits::SmsSender;
use super::types::{ChallengeIssued, DeliveryStatus, IssueOutcome};

/// Verification service orchestrating one-time code challenges
///
/// Owns both challenge flows (phone verification and 2FA-disable) end to
/// end: code generation, persistence, SMS dispatch and single-use
/// validation.
pub struct VerificationService<U: UserRepository, O: OtpRepository, S: SmsSender> {
    /// Repository for loading and mutating users
    user_repository: Arc<U>,
    /// Repository for OTP records
    otp_repository: Arc<O>,
    /// SMS collaborator for code delivery
    sms_service: Arc<S>,
    /// Service configuration
    config: VerificationConfig,
}

impl<U: UserRepository, O: OtpRepository, S: SmsSender> VerificationService<U, O, S> {
    /// Create a new verification service with the default configuration
    pub fn new(user_repository: Arc<U>, otp_repository: Arc<O>, sms_service: Arc<S>) -> Self {
        Self::with_config(
            user_repository,
            otp_repository,
            sms_service,
            VerificationConfig::default(),
        )
    }

    /// Create a new verification service with a custom configuration
    pub fn with_config(
        user_repository: Arc<U>,
        otp_repository: Arc<O>,
        sms_service: Arc<S>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_repository,
            sms_service,
            config,
        }
    }

    /// Issue a phone-verification challenge
    ///
    /// This method:
    /// 1. Loads the user
    /// 2. Short-circuits if the phone is already verified (idempotent no-op)
    /// 3. Generates a code, persists it, computes its expiry
    /// 4. Dispatches the code via SMS
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated caller's user id
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Challenge issued, or nothing to do
    /// * `Err(DomainError)` - User missing or persistence failed
    pub async fn send_phone_verification(&self, user_id: Uuid) -> DomainResult<IssueOutcome> {
        // 1. Load the user
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ChallengeError::UserNotFound)?;

        // 2. Re-verification is reported as success with no side effects
        if user.is_phone_verified {
            tracing::debug!(
                user_id = %user.id,
                event = "phone_already_verified",
                "Phone already verified; no challenge issued"
            );
            return Ok(IssueOutcome::AlreadyVerified);
        }

        // 3-4. Generate, persist and dispatch
        let challenge = self
            .issue_challenge(&user, OtpUseCase::PhoneVerification)
            .await?;
        Ok(IssueOutcome::Issued(challenge))
    }

    /// Issue a 2FA-disable challenge
    ///
    /// The enabled/disabled gate belongs to the two-factor controller; this
    /// flow issues unconditionally for any existing user.
    ///
    /// # Returns
    ///
    /// * `Ok(ChallengeIssued)` - Challenge issued
    /// * `Err(DomainError)` - User missing or persistence failed
    pub async fn send_two_fa_disable_challenge(
        &self,
        user_id: Uuid,
    ) -> DomainResult<ChallengeIssued> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ChallengeError::UserNotFound)?;

        self.issue_challenge(&user, OtpUseCase::DisableTwoFa).await
    }

    /// Validate a phone-verification code
    ///
    /// This method:
    /// 1. Looks up the record matching (user, use case, code)
    /// 2. Rejects expired codes, leaving the record in place
    /// 3. Marks the user's phone as verified
    /// 4. Consumes the record with a conditional delete
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated caller's user id
    /// * `code` - The submitted one-time code
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code accepted and consumed
    /// * `Err(DomainError)` - No match, expired, or a collaborator failed
    pub async fn verify_phone(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        // 1-2. Find the matching record and check its validity window
        let record = self
            .find_live_record(user_id, OtpUseCase::PhoneVerification, code)
            .await?;

        // 3. Apply the idempotent mutation before consuming the record
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ChallengeError::UserNotFound)?;
        user.mark_phone_verified();
        self.user_repository.update(user).await?;

        // 4. Consume; at most one concurrent validation gets the delete
        self.consume_record(&record).await?;

        tracing::info!(
            user_id = %user_id,
            otp_id = %record.id,
            event = "phone_verified",
            "Phone number verified"
        );
        Ok(())
    }

    /// Validate a 2FA-disable code and turn two-factor authentication off
    ///
    /// Mirrors [`verify_phone`](Self::verify_phone) with the `DisableTwoFa`
    /// use case and the `two_fa = false` mutation.
    pub async fn verify_two_fa_disable(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        let record = self
            .find_live_record(user_id, OtpUseCase::DisableTwoFa, code)
            .await?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(ChallengeError::UserNotFound)?;
        user.disable_two_fa();
        self.user_repository.update(user).await?;

        self.consume_record(&record).await?;

        tracing::info!(
            user_id = %user_id,
            otp_id = %record.id,
            event = "two_fa_disabled",
            "Two-factor authentication disabled"
        );
        Ok(())
    }

    /// Generate, persist and dispatch a challenge for one use case
    async fn issue_challenge(
        &self,
        user: &User,
        use_case: OtpUseCase,
    ) -> DomainResult<ChallengeIssued> {
        // Persist before any dispatch; earlier live codes are left untouched
        let code = numeric_code(self.config.code_length);
        let expires_at = issue_expiry(self.config.code_ttl_minutes);
        let record = self
            .otp_repository
            .create(OtpRecord::new(user.id, code.clone(), use_case, expires_at))
            .await?;

        tracing::info!(
            user_id = %user.id,
            use_case = %use_case,
            otp_id = %record.id,
            event = "otp_issued",
            "Issued verification code"
        );

        // A delivery failure leaves the stored code live and usable
        let delivery = match self
            .sms_service
            .send_sms(&user.phone, &sms_text(use_case, &code))
            .await
        {
            Ok(message_id) => DeliveryStatus::Sent { message_id },
            Err(reason) => {
                tracing::warn!(
                    user_id = %user.id,
                    phone = %mask_phone(&user.phone),
                    use_case = %use_case,
                    error = %reason,
                    event = "sms_delivery_failed",
                    "SMS dispatch failed; issued code remains valid"
                );
                DeliveryStatus::Failed { reason }
            }
        };

        Ok(ChallengeIssued {
            otp_id: record.id,
            expires_at: record.expires_at,
            delivery,
        })
    }

    /// Find a record matching (user, use case, code) that is inside its
    /// validity window
    ///
    /// A miss is a single error kind: wrong code, consumed code, another
    /// use case and another user are indistinguishable to the caller.
    async fn find_live_record(
        &self,
        user_id: Uuid,
        use_case: OtpUseCase,
        code: &str,
    ) -> DomainResult<OtpRecord> {
        let record = self
            .otp_repository
            .find_active(user_id, use_case, code)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = %user_id,
                    use_case = %use_case,
                    event = "otp_rejected",
                    "No live verification code matches"
                );
                ChallengeError::InvalidVerificationCode
            })?;

        // Constant-time re-check of the submitted code against the record
        if !constant_time_compare(&record.code, code) {
            return Err(ChallengeError::InvalidVerificationCode.into());
        }

        if record.is_expired() {
            tracing::warn!(
                user_id = %user_id,
                use_case = %use_case,
                otp_id = %record.id,
                event = "otp_expired",
                "Verification code past its expiry"
            );
            return Err(ChallengeError::VerificationCodeExpired.into());
        }

        Ok(record)
    }

    /// Consume a validated record
    ///
    /// The delete is conditional: seeing no row removed means a concurrent
    /// validation consumed the record first, and this one loses.
    async fn consume_record(&self, record: &OtpRecord) -> DomainResult<()> {
        let deleted = self.otp_repository.delete(record.id).await?;
        if !deleted {
            tracing::warn!(
                user_id = %record.user_id,
                otp_id = %record.id,
                event = "otp_already_consumed",
                "Verification code was consumed concurrently"
            );
            return Err(ChallengeError::InvalidVerificationCode.into());
        }
        Ok(())
    }
}

/// The message dispatched for a challenge; the only wire format this core
/// owns
fn sms_text(use_case: OtpUseCase, code: &str) -> String {
    match use_case {
        OtpUseCase::PhoneVerification => format!(
            "Use this code {} to verify the phone number registered on your account",
            code
        ),
        OtpUseCase::DisableTwoFa => format!(
            "Use this code {} to disable multifactor authentication on your account",
            code
        ),
    }
}

/// Constant-time comparison of two codes
fn constant_time_compare(code_a: &str, code_b: &str) -> bool {
    if code_a.len() != code_b.len() {
        return false;
    }
    constant_time_eq(code_a.as_bytes(), code_b.as_bytes())
}
