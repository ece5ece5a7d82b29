//! MySQL implementation of the OtpRepository trait.
//!
//! OTP records live in the `otp_codes` table and are never physically
//! deleted; retirement is expressed through the `is_used` flag so the
//! full issuance history stays queryable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fc_core::domain::entities::otp::OtpRecord;
use fc_core::errors::{DomainError, DomainResult};
use fc_core::repositories::otp::OtpRepository;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an OtpRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> DomainResult<OtpRecord> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let client_id: String = row
            .try_get("client_id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get client_id: {}", e),
            })?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid OTP record UUID: {}", e),
            })?,
            client_id: Uuid::parse_str(&client_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid client UUID: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            attempts: row.try_get("attempts").map_err(|e| DomainError::Internal {
                message: format!("Failed to get attempts: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            is_used: row.try_get("is_used").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_used: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn create(&self, record: &OtpRecord) -> DomainResult<()> {
        let query = r#"
            INSERT INTO otp_codes (
                id, client_id, phone, code, attempts, created_at, expires_at, is_used
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.client_id.to_string())
            .bind(&record.phone)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.is_used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create OTP record: {}", e),
            })?;

        Ok(())
    }

    async fn save(&self, record: &OtpRecord) -> DomainResult<()> {
        // Only attempts and is_used are mutable after creation
        let query = r#"
            UPDATE otp_codes
            SET attempts = ?, is_used = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(record.attempts)
            .bind(record.is_used)
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save OTP record: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Internal {
                message: format!("OTP record {} not found for update", record.id),
            });
        }

        Ok(())
    }

    async fn find_latest_by_client(&self, client_id: Uuid) -> DomainResult<Option<OtpRecord>> {
        let query = r#"
            SELECT id, client_id, phone, code, attempts, created_at, expires_at, is_used
            FROM otp_codes
            WHERE client_id = ?
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(client_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find latest OTP record: {}", e),
            })?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn find_latest_active_by_client(
        &self,
        client_id: Uuid,
    ) -> DomainResult<Option<OtpRecord>> {
        let query = r#"
            SELECT id, client_id, phone, code, attempts, created_at, expires_at, is_used
            FROM otp_codes
            WHERE client_id = ? AND is_used = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(client_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find active OTP record: {}", e),
            })?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn supersede_active(&self, client_id: Uuid) -> DomainResult<u64> {
        // Single conditional update: cannot race a concurrent verify
        // without one side winning cleanly at the database.
        let query = r#"
            UPDATE otp_codes
            SET is_used = TRUE
            WHERE client_id = ? AND is_used = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(client_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to supersede active OTP records: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
