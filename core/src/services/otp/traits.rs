//! Trait for the external messaging delivery collaborator

use async_trait::async_trait;

/// Trait for messaging service integration.
///
/// Delivery is a best-effort side effect of issuance: implementations
/// report failure through the error string, and the OTP service never
/// invalidates an issued code because delivery failed.
#[async_trait]
pub trait MessagingServiceTrait: Send + Sync {
    /// Deliver an OTP code to a phone number (E.164 digit string),
    /// returning the provider message id on success
    async fn send_code(
        &self,
        phone: &str,
        code: &str,
        display_name: &str,
    ) -> Result<String, String>;
}
