//! No-op audit event repository for deployments without an audit sink.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::notification::AuditEvent;
use crate::errors::DomainResult;

use super::AuditEventRepository;

/// Audit repository that silently drops every event
#[derive(Default, Clone, Copy)]
pub struct NoOpAuditEventRepository;

impl NoOpAuditEventRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditEventRepository for NoOpAuditEventRepository {
    async fn create(&self, _event: &AuditEvent) -> DomainResult<()> {
        Ok(())
    }

    async fn find_by_client(
        &self,
        _client_id: Uuid,
        _limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        Ok(Vec::new())
    }

    async fn find_since(
        &self,
        _since: DateTime<Utc>,
        _limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        Ok(Vec::new())
    }

    async fn mark_read(&self, _id: Uuid) -> DomainResult<()> {
        Ok(())
    }
}
