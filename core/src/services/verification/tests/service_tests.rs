//! Unit tests for verification service

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::otp::{OtpRecord, OtpUseCase, CODE_LENGTH};
use crate::domain::entities::user::User;
use crate::errors::{ChallengeError, DomainError};
use crate::repositories::{MockOtpRepository, MockUserRepository, OtpRepository, UserRepository};
use crate::services::verification::{DeliveryStatus, IssueOutcome, VerificationService};

use super::mocks::MockSmsSender;

type TestService = VerificationService<MockUserRepository, MockOtpRepository, MockSmsSender>;

fn build_service(
    sms_should_fail: bool,
) -> (
    Arc<MockUserRepository>,
    Arc<MockOtpRepository>,
    Arc<MockSmsSender>,
    TestService,
) {
    let user_repository = Arc::new(MockUserRepository::new());
    let otp_repository = Arc::new(MockOtpRepository::new());
    let sms_service = Arc::new(MockSmsSender::new(sms_should_fail));
    let service = VerificationService::new(
        user_repository.clone(),
        otp_repository.clone(),
        sms_service.clone(),
    );
    (user_repository, otp_repository, sms_service, service)
}

async fn seed_user(users: &MockUserRepository) -> User {
    users
        .create(User::new("+14155552671".to_string()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_send_phone_verification_issues_challenge() {
    let (users, otps, sms, service) = build_service(false);
    let user = seed_user(&users).await;

    let outcome = service.send_phone_verification(user.id).await.unwrap();
    let challenge = match outcome {
        IssueOutcome::Issued(challenge) => challenge,
        IssueOutcome::AlreadyVerified => panic!("Expected a fresh challenge"),
    };

    assert!(challenge.delivery.is_sent());
    assert!(challenge.expires_at > Utc::now());

    // Exactly one record was persisted, for the right user and use case
    let records = otps
        .find_for_use_case(user.id, OtpUseCase::PhoneVerification)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, challenge.otp_id);
    assert_eq!(records[0].code.len(), CODE_LENGTH);

    // The SMS went to the user's phone and carries the stored code
    let (phone, message) = sms.last_message().unwrap();
    assert_eq!(phone, user.phone);
    assert!(message.contains(&records[0].code));
    assert!(message.contains("verify the phone number"));
}

#[tokio::test]
async fn test_send_phone_verification_skips_verified_user() {
    let (users, otps, sms, service) = build_service(false);
    let mut user = User::new("+14155552671".to_string());
    user.mark_phone_verified();
    let user = users.create(user).await.unwrap();

    let outcome = service.send_phone_verification(user.id).await.unwrap();

    assert!(matches!(outcome, IssueOutcome::AlreadyVerified));
    assert!(otps.is_empty().await);
    assert_eq!(sms.sent_count(), 0);
}

#[tokio::test]
async fn test_send_phone_verification_unknown_user() {
    let (_users, _otps, _sms, service) = build_service(false);

    let result = service.send_phone_verification(Uuid::new_v4()).await;

    match result {
        Err(DomainError::Challenge(ChallengeError::UserNotFound)) => {}
        _ => panic!("Expected UserNotFound error"),
    }
}

#[tokio::test]
async fn test_sms_failure_still_leaves_challenge_valid() {
    let (users, otps, _sms, service) = build_service(true);
    let user = seed_user(&users).await;

    let outcome = service.send_phone_verification(user.id).await.unwrap();
    let challenge = match outcome {
        IssueOutcome::Issued(challenge) => challenge,
        IssueOutcome::AlreadyVerified => panic!("Expected a fresh challenge"),
    };

    // Delivery failed but the record exists and validates normally
    assert!(matches!(challenge.delivery, DeliveryStatus::Failed { .. }));
    let records = otps
        .find_for_use_case(user.id, OtpUseCase::PhoneVerification)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    service.verify_phone(user.id, &records[0].code).await.unwrap();
    assert!(users.stored(user.id).await.unwrap().is_phone_verified);
}

#[tokio::test]
async fn test_verify_phone_success() {
    let (users, otps, sms, service) = build_service(false);
    let user = seed_user(&users).await;

    service.send_phone_verification(user.id).await.unwrap();
    let code = sms.last_code().unwrap();

    service.verify_phone(user.id, &code).await.unwrap();

    let updated = users.stored(user.id).await.unwrap();
    assert!(updated.is_phone_verified);
    // The record is consumed
    assert!(otps.is_empty().await);
}

#[tokio::test]
async fn test_verify_phone_rejects_wrong_code() {
    let (users, otps, sms, service) = build_service(false);
    let user = seed_user(&users).await;

    service.send_phone_verification(user.id).await.unwrap();
    let code = sms.last_code().unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let result = service.verify_phone(user.id, wrong).await;

    match result {
        Err(DomainError::Challenge(ChallengeError::InvalidVerificationCode)) => {}
        _ => panic!("Expected InvalidVerificationCode error"),
    }
    // A failed attempt does not consume the record
    assert_eq!(otps.len().await, 1);
    assert!(!users.stored(user.id).await.unwrap().is_phone_verified);
}

#[tokio::test]
async fn test_verify_phone_code_is_single_use() {
    let (users, _otps, sms, service) = build_service(false);
    let user = seed_user(&users).await;

    service.send_phone_verification(user.id).await.unwrap();
    let code = sms.last_code().unwrap();

    service.verify_phone(user.id, &code).await.unwrap();
    let second = service.verify_phone(user.id, &code).await;

    match second {
        Err(DomainError::Challenge(ChallengeError::InvalidVerificationCode)) => {}
        _ => panic!("Expected InvalidVerificationCode error on replay"),
    }
}

#[tokio::test]
async fn test_verify_phone_rejects_code_at_expiry_instant() {
    let (users, otps, _sms, service) = build_service(false);
    let user = seed_user(&users).await;

    // A record whose expiry has already been reached
    let record = OtpRecord::new(
        user.id,
        "123456".to_string(),
        OtpUseCase::PhoneVerification,
        Utc::now(),
    );
    otps.create(record).await.unwrap();

    let result = service.verify_phone(user.id, "123456").await;

    match result {
        Err(DomainError::Challenge(ChallengeError::VerificationCodeExpired)) => {}
        _ => panic!("Expected VerificationCodeExpired error"),
    }
    // Expired records are rejected, not deleted
    assert_eq!(otps.len().await, 1);
    assert!(!users.stored(user.id).await.unwrap().is_phone_verified);
}

#[tokio::test]
async fn test_verify_phone_accepts_code_before_expiry() {
    let (users, otps, _sms, service) = build_service(false);
    let user = seed_user(&users).await;

    let record = OtpRecord::new(
        user.id,
        "123456".to_string(),
        OtpUseCase::PhoneVerification,
        Utc::now() + Duration::seconds(2),
    );
    otps.create(record).await.unwrap();

    service.verify_phone(user.id, "123456").await.unwrap();
    assert!(users.stored(user.id).await.unwrap().is_phone_verified);
}

#[tokio::test]
async fn test_verify_phone_ignores_other_use_case() {
    let (users, otps, _sms, service) = build_service(false);
    let user = seed_user(&users).await;

    let record = OtpRecord::new(
        user.id,
        "123456".to_string(),
        OtpUseCase::DisableTwoFa,
        Utc::now() + Duration::minutes(5),
    );
    otps.create(record).await.unwrap();

    let result = service.verify_phone(user.id, "123456").await;

    match result {
        Err(DomainError::Challenge(ChallengeError::InvalidVerificationCode)) => {}
        _ => panic!("Expected InvalidVerificationCode error"),
    }
}

#[tokio::test]
async fn test_verify_phone_ignores_other_users_code() {
    let (users, otps, sms, service) = build_service(false);
    let alice = seed_user(&users).await;
    let bob = users
        .create(User::new("+14155550000".to_string()))
        .await
        .unwrap();

    service.send_phone_verification(alice.id).await.unwrap();
    let code = sms.last_code().unwrap();

    let result = service.verify_phone(bob.id, &code).await;

    match result {
        Err(DomainError::Challenge(ChallengeError::InvalidVerificationCode)) => {}
        _ => panic!("Expected InvalidVerificationCode error"),
    }
    // Alice's record is untouched and still usable
    assert_eq!(otps.len().await, 1);
}

#[tokio::test]
async fn test_two_fa_disable_challenge_round_trip() {
    let (users, otps, sms, service) = build_service(false);
    let mut user = User::new("+14155552671".to_string());
    user.enable_two_fa();
    let user = users.create(user).await.unwrap();

    let challenge = service.send_two_fa_disable_challenge(user.id).await.unwrap();
    assert!(challenge.delivery.is_sent());

    let (_, message) = sms.last_message().unwrap();
    assert!(message.contains("disable multifactor authentication"));

    let code = sms.last_code().unwrap();
    service.verify_two_fa_disable(user.id, &code).await.unwrap();

    assert!(!users.stored(user.id).await.unwrap().two_fa);
    assert!(otps.is_empty().await);
}

#[tokio::test]
async fn test_verify_rejects_record_for_missing_user() {
    let (_users, otps, _sms, service) = build_service(false);
    let ghost = Uuid::new_v4();

    let record = OtpRecord::new(
        ghost,
        "123456".to_string(),
        OtpUseCase::PhoneVerification,
        Utc::now() + Duration::minutes(5),
    );
    otps.create(record).await.unwrap();

    let result = service.verify_phone(ghost, "123456").await;

    match result {
        Err(DomainError::Challenge(ChallengeError::UserNotFound)) => {}
        _ => panic!("Expected UserNotFound error"),
    }
}

#[tokio::test]
async fn test_storage_failure_propagates_on_issue() {
    let (users, otps, _sms, service) = build_service(false);
    let user = seed_user(&users).await;

    otps.set_should_fail(true);
    let result = service.send_phone_verification(user.id).await;

    match result {
        Err(DomainError::Storage { .. }) => {}
        _ => panic!("Expected Storage error"),
    }
}

#[tokio::test]
async fn test_storage_failure_propagates_on_verify() {
    let (users, otps, sms, service) = build_service(false);
    let user = seed_user(&users).await;

    service.send_phone_verification(user.id).await.unwrap();
    let code = sms.last_code().unwrap();

    otps.set_should_fail(true);
    let result = service.verify_phone(user.id, &code).await;

    match result {
        Err(DomainError::Storage { .. }) => {}
        _ => panic!("Expected Storage error"),
    }
}
