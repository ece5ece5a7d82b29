//! HTTP gateway to the external messaging API.
//!
//! Sends templated OTP messages over a JSON API. Errors are surfaced as
//! plain strings because the OTP service treats delivery failure as a
//! non-fatal outcome rather than an error type of its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use fc_core::services::otp::MessagingServiceTrait;
use fc_shared::config::{Environment, MessagingConfig};
use fc_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Request body for the messaging API's send endpoint
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    to: &'a str,
    template: &'a str,
    sender: &'a str,
    params: MessageParams<'a>,
}

#[derive(Debug, Serialize)]
struct MessageParams<'a> {
    name: &'a str,
    code: &'a str,
}

/// Response body returned by the messaging API on success
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    message_id: String,
}

/// Production gateway to the messaging provider
pub struct MessageGateway {
    client: reqwest::Client,
    config: MessagingConfig,
}

impl MessageGateway {
    /// Create a gateway from configuration
    pub fn new(config: MessagingConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config(
                "MESSAGING_API_URL not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            api_url = %config.api_url,
            template = %config.template_name,
            "Messaging gateway initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MessagingConfig::from_env(Environment::from_env()))
    }
}

#[async_trait]
impl MessagingServiceTrait for MessageGateway {
    async fn send_code(
        &self,
        phone: &str,
        code: &str,
        display_name: &str,
    ) -> Result<String, String> {
        let url = format!("{}/messages", self.config.api_url.trim_end_matches('/'));
        let body = SendMessageRequest {
            to: phone,
            template: &self.config.template_name,
            sender: &self.config.sender_name,
            params: MessageParams {
                name: display_name,
                code,
            },
        };

        debug!(
            phone = %mask_phone_number(phone),
            template = %self.config.template_name,
            "Sending OTP message"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    phone = %mask_phone_number(phone),
                    "Messaging API request failed: {}",
                    e
                );
                format!("Messaging API request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                phone = %mask_phone_number(phone),
                status = %status,
                "Messaging API rejected the message: {}",
                detail
            );
            return Err(format!("Messaging API returned {}: {}", status, detail));
        }

        let parsed: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| format!("Invalid messaging API response: {}", e))?;

        info!(
            phone = %mask_phone_number(phone),
            message_id = %parsed.message_id,
            "OTP message accepted by provider"
        );

        Ok(parsed.message_id)
    }
}
