//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpRecord, OtpUseCase};
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// Mock OTP repository for testing
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
    should_fail: AtomicBool,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail with a storage error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Snapshot of a stored record, for assertions
    pub async fn stored(&self, id: Uuid) -> Option<OtpRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock repository error".to_string(),
            });
        }

        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        use_case: OtpUseCase,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock repository error".to_string(),
            });
        }

        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.user_id == user_id && r.use_case == use_case && r.code == code)
            .cloned())
    }

    async fn find_for_use_case(
        &self,
        user_id: Uuid,
        use_case: OtpUseCase,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock repository error".to_string(),
            });
        }

        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && r.use_case == use_case)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock repository error".to_string(),
            });
        }

        let mut records = self.records.write().await;
        Ok(records.remove(&id).is_some())
    }
}
