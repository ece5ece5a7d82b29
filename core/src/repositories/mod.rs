//! Repository interfaces for persistence collaborators.

pub mod audit;
pub mod client;
pub mod otp;

pub use audit::{AuditEventRepository, MockAuditEventRepository, NoOpAuditEventRepository};
pub use client::{ClientRepository, MockClientRepository};
pub use otp::{MockOtpRepository, OtpRepository};
