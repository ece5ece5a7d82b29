//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    DeliveryOutcome, IssueOtpResult, MessagingServiceTrait, OtpService, OtpServiceConfig,
    OtpStatus, VerifiedClient,
};
