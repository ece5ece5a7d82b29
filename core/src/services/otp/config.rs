//! Configuration for the OTP lifecycle service

use crate::domain::entities::otp::{
    DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, RESEND_COOLDOWN_SECONDS,
};

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before an OTP code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: i32,
    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,
    /// Country code prefixed to bare 10-digit phone numbers
    pub default_country_code: String,
    /// Whether codes are dispatched through the messaging collaborator
    pub delivery_enabled: bool,
    /// Whether a skipped delivery echoes the code back to the caller.
    /// Callers must derive this from `MessagingConfig::echo_code_allowed`
    /// so it can never be enabled in production.
    pub echo_code_when_disabled: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            default_country_code: String::from("91"),
            delivery_enabled: true,
            echo_code_when_disabled: false,
        }
    }
}
