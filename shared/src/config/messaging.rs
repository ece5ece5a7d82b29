//! Messaging delivery configuration module
//!
//! Credentials and delivery policy for the external messaging API used to
//! deliver OTP codes. The configuration is read once at startup and injected
//! into the messaging gateway at construction, rather than re-reading the
//! process environment on every send.

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Default country code prefixed to bare 10-digit phone numbers
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Messaging API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagingConfig {
    /// Base URL of the messaging API
    pub api_url: String,

    /// API key for authentication
    pub api_key: String,

    /// Name of the pre-approved message template carrying the OTP
    pub template_name: String,

    /// Display name shown as the message sender
    pub sender_name: String,

    /// Country code prefixed when a bare 10-digit number is supplied
    pub default_country_code: String,

    /// Whether messages are actually dispatched to the provider
    pub delivery_enabled: bool,

    /// Whether the OTP code may be echoed back to the issuing caller when
    /// delivery is disabled. Only honored outside production; see
    /// `echo_code_allowed`.
    pub echo_code_when_disabled: bool,

    /// Request timeout in seconds for provider calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Environment the config was loaded for
    #[serde(default)]
    pub environment: Environment,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://messages.example.com/v1"),
            api_key: String::new(),
            template_name: String::from("client_otp"),
            sender_name: String::from("FieldCRM"),
            default_country_code: String::from(DEFAULT_COUNTRY_CODE),
            delivery_enabled: true,
            echo_code_when_disabled: false,
            request_timeout_secs: default_request_timeout(),
            environment: Environment::Development,
        }
    }
}

impl MessagingConfig {
    /// Create from environment variables
    pub fn from_env(environment: Environment) -> Self {
        Self {
            api_url: std::env::var("MESSAGING_API_URL")
                .unwrap_or_else(|_| "https://messages.example.com/v1".to_string()),
            api_key: std::env::var("MESSAGING_API_KEY").unwrap_or_default(),
            template_name: std::env::var("MESSAGING_TEMPLATE_NAME")
                .unwrap_or_else(|_| "client_otp".to_string()),
            sender_name: std::env::var("MESSAGING_SENDER_NAME")
                .unwrap_or_else(|_| "FieldCRM".to_string()),
            default_country_code: std::env::var("MESSAGING_DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|_| DEFAULT_COUNTRY_CODE.to_string()),
            delivery_enabled: std::env::var("MESSAGING_DELIVERY_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            echo_code_when_disabled: std::env::var("MESSAGING_ECHO_CODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            request_timeout_secs: std::env::var("MESSAGING_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            environment,
        }
    }

    /// Whether the issued code may be returned over the response channel.
    ///
    /// Requires delivery to be disabled AND an explicit opt-in AND a
    /// non-production environment. Never a silent default.
    pub fn echo_code_allowed(&self) -> bool {
        !self.delivery_enabled
            && self.echo_code_when_disabled
            && !self.environment.is_production()
    }
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_requires_disabled_delivery() {
        let config = MessagingConfig {
            delivery_enabled: true,
            echo_code_when_disabled: true,
            environment: Environment::Development,
            ..Default::default()
        };
        assert!(!config.echo_code_allowed());
    }

    #[test]
    fn test_echo_never_allowed_in_production() {
        let config = MessagingConfig {
            delivery_enabled: false,
            echo_code_when_disabled: true,
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(!config.echo_code_allowed());
    }

    #[test]
    fn test_echo_allowed_when_opted_in_outside_production() {
        let config = MessagingConfig {
            delivery_enabled: false,
            echo_code_when_disabled: true,
            environment: Environment::Staging,
            ..Default::default()
        };
        assert!(config.echo_code_allowed());
    }

    #[test]
    fn test_echo_not_a_silent_default() {
        let config = MessagingConfig {
            delivery_enabled: false,
            environment: Environment::Development,
            ..Default::default()
        };
        assert!(!config.echo_code_allowed());
    }
}
