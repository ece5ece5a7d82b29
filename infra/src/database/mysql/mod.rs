//! MySQL repository implementations backed by SQLx.

pub mod audit_repository_impl;
pub mod client_repository_impl;
pub mod otp_repository_impl;

pub use audit_repository_impl::MySqlAuditEventRepository;
pub use client_repository_impl::MySqlClientRepository;
pub use otp_repository_impl::MySqlOtpRepository;
