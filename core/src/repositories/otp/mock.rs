//! In-memory mock OTP repository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::{DomainError, DomainResult};

use super::OtpRepository;

/// Mock OTP repository backed by an in-memory vector.
///
/// Records are ordered by insertion, which mock lookups treat as
/// creation order. `set_fail` makes every operation return an internal
/// error to exercise persistence-failure paths.
#[derive(Default)]
pub struct MockOtpRepository {
    records: Arc<Mutex<Vec<OtpRecord>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent operations fail
    pub fn set_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    /// All stored records for a client, in creation order
    pub fn records_for(&self, client_id: Uuid) -> Vec<OtpRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect()
    }

    /// Number of unused records for a client
    pub fn active_count(&self, client_id: Uuid) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id && !r.is_used)
            .count()
    }

    /// Total number of stored records
    pub fn total_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check_fail(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            Err(DomainError::Internal {
                message: "mock otp repository failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn create(&self, record: &OtpRecord) -> DomainResult<()> {
        self.check_fail()?;
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn save(&self, record: &OtpRecord) -> DomainResult<()> {
        self.check_fail()?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("otp record {}", record.id),
            }),
        }
    }

    async fn find_latest_by_client(&self, client_id: Uuid) -> DomainResult<Option<OtpRecord>> {
        self.check_fail()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id)
            .last()
            .cloned())
    }

    async fn find_latest_active_by_client(
        &self,
        client_id: Uuid,
    ) -> DomainResult<Option<OtpRecord>> {
        self.check_fail()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id && !r.is_used)
            .last()
            .cloned())
    }

    async fn supersede_active(&self, client_id: Uuid) -> DomainResult<u64> {
        self.check_fail()?;
        let mut superseded = 0;
        for record in self
            .records
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|r| r.client_id == client_id && !r.is_used)
        {
            record.is_used = true;
            superseded += 1;
        }
        Ok(superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_supersede_marks_only_unused_for_client() {
        let repo = MockOtpRepository::new();
        let client_a = Uuid::new_v4();
        let client_b = Uuid::new_v4();

        let first = OtpRecord::new(client_a, "919876543210".to_string());
        let second = OtpRecord::new(client_a, "919876543210".to_string());
        let other = OtpRecord::new(client_b, "14155552671".to_string());
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();
        repo.create(&other).await.unwrap();

        assert_eq!(repo.supersede_active(client_a).await.unwrap(), 2);
        assert_eq!(repo.active_count(client_a), 0);
        assert_eq!(repo.active_count(client_b), 1);
    }

    #[tokio::test]
    async fn test_latest_lookups_follow_creation_order() {
        let repo = MockOtpRepository::new();
        let client_id = Uuid::new_v4();

        let mut first = OtpRecord::new(client_id, "919876543210".to_string());
        first.mark_used();
        let second = OtpRecord::new(client_id, "919876543210".to_string());
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let latest = repo.find_latest_by_client(client_id).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);

        let active = repo
            .find_latest_active_by_client(client_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id, second.id);
    }

    #[tokio::test]
    async fn test_save_requires_existing_record() {
        let repo = MockOtpRepository::new();
        let record = OtpRecord::new(Uuid::new_v4(), "919876543210".to_string());
        assert!(repo.save(&record).await.is_err());

        repo.create(&record).await.unwrap();
        let mut updated = record.clone();
        updated.attempts = 2;
        repo.save(&updated).await.unwrap();

        let stored = repo
            .find_latest_by_client(record.client_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.attempts, 2);
    }

    #[tokio::test]
    async fn test_fail_flag() {
        let repo = MockOtpRepository::new();
        repo.set_fail(true);
        let record = OtpRecord::new(Uuid::new_v4(), "919876543210".to_string());
        assert!(repo.create(&record).await.is_err());
        assert!(repo.find_latest_by_client(record.client_id).await.is_err());
    }
}
