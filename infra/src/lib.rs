//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators consumed by `fc_core`:
//! - **Database**: MySQL repositories using SQLx
//! - **Messaging**: HTTP gateway to the external messaging API
//!
//! Each OTP operation runs against the database within its own
//! short-lived statements; the supersession step relies on MySQL's
//! single-statement atomic update semantics rather than in-process
//! locking.

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Messaging module - external message delivery
pub mod messaging;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Messaging service error
    #[error("Messaging error: {0}")]
    Messaging(String),
}
