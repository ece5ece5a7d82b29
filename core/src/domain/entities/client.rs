//! Client entity projection used by the OTP flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A CRM client as seen by the verification subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier for the client
    pub id: Uuid,

    /// Client display name (used in the delivery template)
    pub name: String,

    /// Phone number as entered by the salesman, if any
    pub phone: Option<String>,

    /// Timestamp when the client record was created
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client record
    pub fn new(name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone,
            created_at: Utc::now(),
        }
    }
}
