//! DTOs for the OTP endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for POST /api/v1/otp/send and /api/v1/otp/resend
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Client to verify
    pub client_id: Uuid,

    /// Salesman initiating the action, when user-initiated
    pub actor_id: Option<Uuid>,
}

/// Request body for POST /api/v1/otp/verify
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Client the code was issued for
    pub client_id: Uuid,

    /// The submitted code; always 6 digits
    #[validate(length(equal = 6, message = "OTP must be exactly 6 digits"))]
    pub otp: String,
}

/// Response body for a successful send or resend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    /// Human-readable confirmation
    pub message: String,

    /// Seconds until the issued code expires
    pub expires_in_seconds: i64,

    /// Seconds until a resend will be accepted
    pub resend_after: i64,

    /// Whether the message reached the provider
    pub delivered: bool,

    /// The issued code, present only when delivery is disabled and
    /// echoing is allowed for this deployment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Response body for a successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    /// Always true on the success path
    pub verified: bool,

    /// The verified client
    pub client_id: Uuid,

    /// When verification completed
    pub verified_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_rejects_short_code() {
        let request = VerifyOtpRequest {
            client_id: Uuid::new_v4(),
            otp: "123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_verify_request_accepts_six_digits() {
        let request = VerifyOtpRequest {
            client_id: Uuid::new_v4(),
            otp: "123456".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
