//! Email channel adapter.
//!
//! Sends notifications through the Resend HTTP API with bearer auth.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::provider::{ChannelProvider, DeliveryOutcome};
use crate::config::settings::EmailChannelConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::models::{ChannelType, Notification};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Resend email adapter
pub struct EmailProvider {
    api_key: String,
    from_address: String,
    app_name: String,
    timeout: Duration,
}

impl EmailProvider {
    pub fn new(config: &EmailChannelConfig, app_name: &str, timeout: Duration) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self {
            api_key: config.api_key.clone()?,
            from_address: config.from_address.clone(),
            app_name: app_name.to_string(),
            timeout,
        })
    }

    /// Build the email subject. Pure, so priority mapping is unit-testable.
    pub(crate) fn build_subject(&self, notification: &Notification) -> String {
        format!(
            "[{}] {} alert",
            notification.priority.label(),
            self.app_name
        )
    }

    /// Build the plain-text body with a metadata block when present.
    pub(crate) fn build_text(notification: &Notification) -> String {
        let mut body = format!("{}\n", notification.message);
        if !notification.metadata.is_empty() {
            body.push_str("\nDetails:\n");
            let mut keys: Vec<_> = notification.metadata.keys().collect();
            keys.sort();
            for key in keys {
                body.push_str(&format!("  {}: {}\n", key, notification.metadata[key]));
            }
        }
        body
    }

    fn build_payload(&self, notification: &Notification, recipient: &str) -> Value {
        json!({
            "from": self.from_address,
            "to": [recipient],
            "subject": self.build_subject(notification),
            "text": Self::build_text(notification),
        })
    }
}

#[async_trait]
impl ChannelProvider for EmailProvider {
    async fn deliver(&self, notification: &Notification) -> AppResult<DeliveryOutcome> {
        let recipient = notification
            .recipient
            .as_deref()
            .ok_or_else(|| AppError::validation("recipient", "Email recipient required"))?;

        let start = Instant::now();
        let payload = self.build_payload(notification, recipient);

        let response = HTTP_CLIENT
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let success = resp.status().is_success();
                let detail = if success {
                    None
                } else {
                    let body = resp.text().await.unwrap_or_default();
                    Some(format!("Email API returned {}: {}", status_code, body))
                };
                Ok(DeliveryOutcome::from_status(
                    status_code,
                    success,
                    detail,
                    duration_ms,
                ))
            }
            Err(e) => Ok(DeliveryOutcome::transport_error(
                format!("Email send failed: {}", e),
                duration_ms,
            )),
        }
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Email
    }
}
