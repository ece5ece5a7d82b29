//! Shared utilities and common types for the FieldCRM server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response structures
//! - Utility functions (phone normalization, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, MessagingConfig, ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::phone;
