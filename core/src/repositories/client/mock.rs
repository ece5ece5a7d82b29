//! In-memory mock client repository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::client::Client;
use crate::errors::DomainResult;

use super::ClientRepository;

/// Mock client repository backed by a hash map
#[derive(Default)]
pub struct MockClientRepository {
    clients: Arc<Mutex<HashMap<Uuid, Client>>>,
}

impl MockClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a client, returning its id
    pub fn insert(&self, client: Client) -> Uuid {
        let id = client.id;
        self.clients.lock().unwrap().insert(id, client);
        id
    }

    /// Convenience: insert a client with the given name and phone
    pub fn insert_with_phone(&self, name: &str, phone: Option<&str>) -> Uuid {
        self.insert(Client::new(name, phone.map(|p| p.to_string())))
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Client>> {
        Ok(self.clients.lock().unwrap().get(&id).cloned())
    }
}
