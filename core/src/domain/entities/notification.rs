//! Audit event entity recording OTP-related actions for compliance review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types for OTP lifecycle auditing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    /// A new OTP was issued for a client
    OtpIssued,
    /// An OTP was resent (previous code superseded)
    OtpResent,
    /// An OTP was successfully verified
    OtpVerified,
    /// A verification attempt failed
    OtpVerifyFailed,
    /// A resend was rejected by the cooldown
    OtpRateLimited,
    /// Message delivery to the provider failed
    OtpDeliveryFailed,
}

impl AuditEventType {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OtpIssued => "OTP_ISSUED",
            Self::OtpResent => "OTP_RESENT",
            Self::OtpVerified => "OTP_VERIFIED",
            Self::OtpVerifyFailed => "OTP_VERIFY_FAILED",
            Self::OtpRateLimited => "OTP_RATE_LIMITED",
            Self::OtpDeliveryFailed => "OTP_DELIVERY_FAILED",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OTP_ISSUED" => Some(Self::OtpIssued),
            "OTP_RESENT" => Some(Self::OtpResent),
            "OTP_VERIFIED" => Some(Self::OtpVerified),
            "OTP_VERIFY_FAILED" => Some(Self::OtpVerifyFailed),
            "OTP_RATE_LIMITED" => Some(Self::OtpRateLimited),
            "OTP_DELIVERY_FAILED" => Some(Self::OtpDeliveryFailed),
            _ => None,
        }
    }
}

/// Immutable record of an OTP-related action.
///
/// Created as a side effect of issuance, resend, and verification; the
/// log is append-only. Only the orthogonal `is_read` review flag is ever
/// updated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// Type of OTP event
    pub event_type: AuditEventType,

    /// Acting salesman, when the action was user-initiated
    pub actor_id: Option<Uuid>,

    /// Client affected by the action
    pub client_id: Uuid,

    /// Human-readable description for the audit trail
    pub message: String,

    /// OTP record this event relates to, if any
    pub otp_id: Option<Uuid>,

    /// Whether an admin has reviewed this event
    pub is_read: bool,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Create a new audit event for a client
    pub fn new(event_type: AuditEventType, client_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            actor_id: None,
            client_id,
            message: String::new(),
            otp_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Attribute the event to an acting salesman
    pub fn with_actor(mut self, actor_id: Uuid) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Link the event to an OTP record
    pub fn with_otp(mut self, otp_id: Uuid) -> Self {
        self.otp_id = Some(otp_id);
        self
    }

    /// Set the audit trail description
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip() {
        let all = [
            AuditEventType::OtpIssued,
            AuditEventType::OtpResent,
            AuditEventType::OtpVerified,
            AuditEventType::OtpVerifyFailed,
            AuditEventType::OtpRateLimited,
            AuditEventType::OtpDeliveryFailed,
        ];
        for event_type in all {
            assert_eq!(AuditEventType::parse(event_type.as_str()), Some(event_type));
        }
        assert_eq!(AuditEventType::parse("NOT_AN_EVENT"), None);
    }

    #[test]
    fn test_builder_helpers() {
        let actor = Uuid::new_v4();
        let client = Uuid::new_v4();
        let otp = Uuid::new_v4();

        let event = AuditEvent::new(AuditEventType::OtpIssued, client)
            .with_actor(actor)
            .with_otp(otp)
            .with_message("OTP issued for client");

        assert_eq!(event.actor_id, Some(actor));
        assert_eq!(event.client_id, client);
        assert_eq!(event.otp_id, Some(otp));
        assert_eq!(event.message, "OTP issued for client");
        assert!(!event.is_read);
    }
}
