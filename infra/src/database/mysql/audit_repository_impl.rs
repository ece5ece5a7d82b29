//! MySQL implementation of the AuditEventRepository trait.
//!
//! Audit events are stored in the append-only `otp_audit_events` table.
//! Rows are never updated after creation except for the `is_read` review
//! flag.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fc_core::domain::entities::notification::{AuditEvent, AuditEventType};
use fc_core::errors::{DomainError, DomainResult};
use fc_core::repositories::audit::AuditEventRepository;

/// MySQL implementation of AuditEventRepository
pub struct MySqlAuditEventRepository {
    pool: MySqlPool,
}

impl MySqlAuditEventRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &sqlx::mysql::MySqlRow) -> DomainResult<AuditEvent> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let event_type_str: String =
            row.try_get("event_type").map_err(|e| DomainError::Internal {
                message: format!("Failed to get event_type: {}", e),
            })?;

        let event_type =
            AuditEventType::parse(&event_type_str).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown audit event type: {}", event_type_str),
            })?;

        let actor_id: Option<String> =
            row.try_get("actor_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get actor_id: {}", e),
            })?;

        let actor_id = actor_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| DomainError::Internal {
                message: format!("Invalid actor UUID: {}", e),
            })?;

        let client_id: String =
            row.try_get("client_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get client_id: {}", e),
            })?;

        let otp_id: Option<String> =
            row.try_get("otp_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get otp_id: {}", e),
            })?;

        let otp_id = otp_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| DomainError::Internal {
                message: format!("Invalid OTP record UUID: {}", e),
            })?;

        Ok(AuditEvent {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid event UUID: {}", e),
            })?,
            event_type,
            actor_id,
            client_id: Uuid::parse_str(&client_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid client UUID: {}", e),
            })?,
            message: row.try_get("message").map_err(|e| DomainError::Internal {
                message: format!("Failed to get message: {}", e),
            })?,
            otp_id,
            is_read: row.try_get("is_read").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_read: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl AuditEventRepository for MySqlAuditEventRepository {
    async fn create(&self, event: &AuditEvent) -> DomainResult<()> {
        let query = r#"
            INSERT INTO otp_audit_events (
                id, event_type, actor_id, client_id, message, otp_id, is_read, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(event.id.to_string())
            .bind(event.event_type.as_str())
            .bind(event.actor_id.map(|id| id.to_string()))
            .bind(event.client_id.to_string())
            .bind(&event.message)
            .bind(event.otp_id.map(|id| id.to_string()))
            .bind(event.is_read)
            .bind(event.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create audit event: {}", e),
            })?;

        Ok(())
    }

    async fn find_by_client(
        &self,
        client_id: Uuid,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        let query = r#"
            SELECT id, event_type, actor_id, client_id, message, otp_id, is_read, created_at
            FROM otp_audit_events
            WHERE client_id = ?
            ORDER BY created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(client_id.to_string())
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find audit events by client: {}", e),
            })?;

        rows.iter()
            .map(Self::row_to_event)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn find_since(
        &self,
        since: DateTime<Utc>,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        let query = r#"
            SELECT id, event_type, actor_id, client_id, message, otp_id, is_read, created_at
            FROM otp_audit_events
            WHERE created_at >= ?
            ORDER BY created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(since)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find audit events since timestamp: {}", e),
            })?;

        rows.iter()
            .map(Self::row_to_event)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn mark_read(&self, id: Uuid) -> DomainResult<()> {
        let query = r#"
            UPDATE otp_audit_events
            SET is_read = TRUE
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to mark audit event as read: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("Audit event {}", id),
            });
        }

        Ok(())
    }
}
