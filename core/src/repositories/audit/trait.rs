//! Audit event repository trait defining the interface for audit persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::notification::AuditEvent;
use crate::errors::DomainResult;

/// Repository trait for AuditEvent persistence.
///
/// The log is append-only and safe for concurrent writers; the OTP
/// service treats `create` as fire-and-forget so audit writes never
/// block verification flows.
#[async_trait]
pub trait AuditEventRepository: Send + Sync {
    /// Append a new audit event
    async fn create(&self, event: &AuditEvent) -> DomainResult<()>;

    /// Events for a client, ordered by created_at descending
    async fn find_by_client(
        &self,
        client_id: Uuid,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>>;

    /// Events created at or after `since`, ordered by created_at descending
    async fn find_since(&self, since: DateTime<Utc>, limit: usize)
        -> DomainResult<Vec<AuditEvent>>;

    /// Flip the orthogonal review flag on an event
    async fn mark_read(&self, id: Uuid) -> DomainResult<()>;
}
