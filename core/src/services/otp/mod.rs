//! OTP lifecycle service for client identity verification
//!
//! This module owns the full OTP workflow:
//! - code issuance with supersession of prior codes
//! - verification with attempt tracking and lazy expiry
//! - resend with a per-client cooldown
//! - read-only status queries
//! - audit events emitted as side effects of each action

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::MessagingServiceTrait;
pub use types::{DeliveryOutcome, IssueOtpResult, OtpStatus, VerifiedClient};
