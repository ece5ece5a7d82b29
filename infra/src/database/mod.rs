//! Database module - connection management and MySQL repositories.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{MySqlAuditEventRepository, MySqlClientRepository, MySqlOtpRepository};
