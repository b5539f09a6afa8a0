//! OTP repository trait defining the interface for one-time code persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpRecord, OtpUseCase};
use crate::errors::DomainError;

/// Repository trait for OtpRecord persistence operations
///
/// Lookups match exactly on (user, use case, code); the store applies no
/// expiry filtering and no input normalization. Several live records may
/// coexist for the same user and use case, and `create` must not
/// deduplicate against them.
///
/// # Example
/// ```no_run
/// # use account_core::domain::entities::otp::OtpUseCase;
/// # use account_core::repositories::OtpRepository;
/// # async fn example(repo: &impl OtpRepository) -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = uuid::Uuid::new_v4();
///
/// if let Some(record) = repo
///     .find_active(user_id, OtpUseCase::PhoneVerification, "042998")
///     .await?
/// {
///     repo.delete(record.id).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert a new record
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The stored record
    /// * `Err(DomainError)` - Insertion failed
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find the record matching all of user, use case and code
    ///
    /// Expired records are still returned; expiry is the caller's check.
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - A record matched on all three fields
    /// * `Ok(None)` - No match
    /// * `Err(DomainError)` - Lookup failed
    async fn find_active(
        &self,
        user_id: Uuid,
        use_case: OtpUseCase,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// All records for a user within one use case, in no particular order
    async fn find_for_use_case(
        &self,
        user_id: Uuid,
        use_case: OtpUseCase,
    ) -> Result<Vec<OtpRecord>, DomainError>;

    /// Conditionally delete a record by id
    ///
    /// The result states whether this call removed the record, so two
    /// concurrent deletions of the same id resolve to exactly one `true`.
    ///
    /// # Returns
    /// * `Ok(true)` - The record existed and this call removed it
    /// * `Ok(false)` - No record with that id (already consumed); not an error
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
