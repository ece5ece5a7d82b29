//! Domain entities representing core business objects.

pub mod client;
pub mod notification;
pub mod otp;

// Re-export commonly used types
pub use client::Client;
pub use notification::{AuditEvent, AuditEventType};
pub use otp::{
    OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, RESEND_COOLDOWN_SECONDS,
};
