//! In-memory messaging gateway for development and integration tests.
//!
//! Records every send instead of calling the provider. Useful when
//! running locally without messaging credentials and when exercising the
//! HTTP surface end to end.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

use fc_core::services::otp::MessagingServiceTrait;
use fc_shared::utils::phone::mask_phone_number;

/// A message captured by the mock gateway
#[derive(Debug, Clone)]
pub struct CapturedMessage {
    pub phone: String,
    pub code: String,
    pub display_name: String,
}

/// Mock gateway recording sends in memory
#[derive(Clone, Default)]
pub struct MockMessageGateway {
    messages: Arc<Mutex<Vec<CapturedMessage>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockMessageGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail, for testing delivery-failure paths
    pub fn set_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    /// All messages captured so far
    pub fn messages(&self) -> Vec<CapturedMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// The most recent code sent to a phone number
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.phone == phone)
            .map(|m| m.code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MessagingServiceTrait for MockMessageGateway {
    async fn send_code(
        &self,
        phone: &str,
        code: &str,
        display_name: &str,
    ) -> Result<String, String> {
        if *self.should_fail.lock().unwrap() {
            return Err("mock gateway configured to fail".to_string());
        }

        info!(
            phone = %mask_phone_number(phone),
            "Mock gateway captured OTP message"
        );

        self.messages.lock().unwrap().push(CapturedMessage {
            phone: phone.to_string(),
            code: code.to_string(),
            display_name: display_name.to_string(),
        });

        Ok(format!("mock-{}", Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_records_sends() {
        let gateway = MockMessageGateway::new();

        let id = gateway
            .send_code("919876543210", "123456", "Asha")
            .await
            .unwrap();
        assert!(id.starts_with("mock-"));
        assert_eq!(gateway.sent_count(), 1);
        assert_eq!(
            gateway.last_code_for("919876543210"),
            Some("123456".to_string())
        );
    }

    #[tokio::test]
    async fn test_mock_gateway_failure_mode() {
        let gateway = MockMessageGateway::new();
        gateway.set_fail(true);

        let result = gateway.send_code("919876543210", "123456", "Asha").await;
        assert!(result.is_err());
        assert_eq!(gateway.sent_count(), 0);
    }
}
