//! SMS channel adapter.
//!
//! Sends notifications through the Twilio Messages API with HTTP basic
//! auth and a form-encoded body.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::provider::{ChannelProvider, DeliveryOutcome};
use crate::config::settings::SmsChannelConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::models::{ChannelType, Notification};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Twilio SMS adapter
pub struct SmsProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    timeout: Duration,
}

impl SmsProvider {
    pub fn new(config: &SmsChannelConfig, timeout: Duration) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self {
            account_sid: config.account_sid.clone()?,
            auth_token: config.auth_token.clone()?,
            from_number: config.from_number.clone()?,
            timeout,
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.account_sid
        )
    }

    /// Build the SMS body. Pure, so priority mapping is unit-testable.
    pub(crate) fn build_body(notification: &Notification) -> String {
        format!(
            "[{}] {}",
            notification.priority.label(),
            notification.message
        )
    }
}

#[async_trait]
impl ChannelProvider for SmsProvider {
    async fn deliver(&self, notification: &Notification) -> AppResult<DeliveryOutcome> {
        let recipient = notification
            .recipient
            .as_deref()
            .ok_or_else(|| AppError::validation("recipient", "SMS recipient required"))?;

        let start = Instant::now();
        let form = [
            ("To", recipient),
            ("From", self.from_number.as_str()),
            ("Body", &Self::build_body(notification)),
        ];

        let response = HTTP_CLIENT
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .timeout(self.timeout)
            .form(&form)
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
                    // Twilio puts the error description in the response body
                    let body = resp.text().await.unwrap_or_default();
                    Some(format!("Twilio returned {}: {}", status_code, body))
                };
                Ok(DeliveryOutcome::from_status(
                    status_code,
                    success,
                    detail,
                    duration_ms,
                ))
            }
            Err(e) => Ok(DeliveryOutcome::transport_error(
                format!("SMS send failed: {}", e),
                duration_ms,
            )),
        }
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Sms
    }
}
