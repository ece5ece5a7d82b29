//! In-memory mock audit event repository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::notification::{AuditEvent, AuditEventType};
use crate::errors::{DomainError, DomainResult};

use super::AuditEventRepository;

/// Mock audit repository recording events in memory
#[derive(Default)]
pub struct MockAuditEventRepository {
    events: Arc<Mutex<Vec<AuditEvent>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAuditEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent operations fail
    pub fn set_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    /// All recorded events, in append order
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events of a given type, in append order
    pub fn events_of_type(&self, event_type: AuditEventType) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    fn check_fail(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            Err(DomainError::Internal {
                message: "mock audit repository failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuditEventRepository for MockAuditEventRepository {
    async fn create(&self, event: &AuditEvent) -> DomainResult<()> {
        self.check_fail()?;
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_by_client(
        &self,
        client_id: Uuid,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        self.check_fail()?;
        let mut events: Vec<AuditEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.client_id == client_id)
            .cloned()
            .collect();
        events.reverse();
        events.truncate(limit);
        Ok(events)
    }

    async fn find_since(
        &self,
        since: DateTime<Utc>,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        self.check_fail()?;
        let mut events: Vec<AuditEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.created_at >= since)
            .cloned()
            .collect();
        events.reverse();
        events.truncate(limit);
        Ok(events)
    }

    async fn mark_read(&self, id: Uuid) -> DomainResult<()> {
        self.check_fail()?;
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.is_read = true;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("audit event {}", id),
            }),
        }
    }
}
