//! # FieldCRM Core
//!
//! Core business logic and domain layer for the FieldCRM backend.
//! This crate contains domain entities, the OTP lifecycle service,
//! repository interfaces, and error types that form the foundation of
//! the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuditEvent, AuditEventType, Client, OtpRecord,
    CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, RESEND_COOLDOWN_SECONDS,
};
pub use errors::{DomainError, DomainResult, OtpError};
pub use repositories::{AuditEventRepository, ClientRepository, OtpRepository};
pub use services::otp::{
    DeliveryOutcome, IssueOtpResult, MessagingServiceTrait, OtpService, OtpServiceConfig,
    OtpStatus, VerifiedClient,
};
