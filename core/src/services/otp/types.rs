//! Result types for OTP lifecycle operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::otp::OtpRecord;

/// Outcome of the best-effort delivery side effect of issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Message accepted by the provider
    Sent { message_id: String },
    /// Provider rejected or errored; the issued code remains valid
    Failed { error: String },
    /// Delivery disabled by configuration. Carries the code only when
    /// echoing is explicitly allowed for this deployment.
    Skipped { echoed_code: Option<String> },
}

impl DeliveryOutcome {
    /// Whether the message reached the provider
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent { .. })
    }
}

/// Result of an issue or resend operation
#[derive(Debug, Clone)]
pub struct IssueOtpResult {
    /// The newly created OTP record
    pub record: OtpRecord,
    /// What happened to the delivery side effect
    pub delivery: DeliveryOutcome,
    /// Earliest instant a resend will be accepted
    pub next_resend_at: DateTime<Utc>,
}

/// Successful verification of a client identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedClient {
    /// The verified client
    pub client_id: Uuid,
    /// When verification completed
    pub verified_at: DateTime<Utc>,
}

/// Read-only snapshot of a client's OTP state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpStatus {
    /// Whether a currently valid OTP exists
    pub has_active_otp: bool,
    /// Used-flag of the latest record, false when none exists
    pub is_used: bool,
    /// Attempt count of the latest record, 0 when none exists
    pub attempts: i32,
    /// Whole seconds until the latest record expires, 0 when none exists
    pub expires_in_seconds: i64,
}

impl OtpStatus {
    /// Status for a client with no OTP record at all
    pub fn none() -> Self {
        Self {
            has_active_otp: false,
            is_used: false,
            attempts: 0,
            expires_in_seconds: 0,
        }
    }
}
