//! Client repository trait for resolving client identities.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::client::Client;
use crate::errors::DomainResult;

/// Read-side repository for client records consumed by the OTP flow
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Look up a client by its identifier
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Client>>;
}
