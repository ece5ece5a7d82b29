//! MySQL implementation of the ClientRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fc_core::domain::entities::client::Client;
use fc_core::errors::{DomainError, DomainResult};
use fc_core::repositories::client::ClientRepository;

/// MySQL implementation of ClientRepository
///
/// Read-only from the OTP flow's perspective; client records are owned
/// by the wider CRM and only consulted here to resolve phone numbers.
pub struct MySqlClientRepository {
    pool: MySqlPool,
}

impl MySqlClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_client(row: &sqlx::mysql::MySqlRow) -> DomainResult<Client> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(Client {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid client UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
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
impl ClientRepository for MySqlClientRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Client>> {
        let query = r#"
            SELECT id, name, phone, created_at
            FROM clients
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find client: {}", e),
            })?;

        row.as_ref().map(Self::row_to_client).transpose()
    }
}
