//! Microsoft Teams channel adapter.
//!
//! Sends notifications to a Teams incoming webhook as an Office 365
//! connector MessageCard.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::provider::{ChannelProvider, DeliveryOutcome};
use crate::config::settings::WebhookChannelConfig;
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use crate::models::{ChannelType, Notification, PriorityLevel};

/// MessageCard themeColor per priority (hex, no leading '#')
fn theme_color(priority: PriorityLevel) -> &'static str {
    match priority {
        PriorityLevel::Info => "3498DB",
        PriorityLevel::Warning => "F39C12",
        PriorityLevel::Critical => "E74C3C",
    }
}

/// Teams webhook adapter
pub struct TeamsProvider {
    webhook_url: String,
    timeout: Duration,
}

impl TeamsProvider {
    pub fn new(config: &WebhookChannelConfig, timeout: Duration) -> Option<Self> {
        let webhook_url = config.webhook_url.clone().filter(|_| config.is_configured())?;
        Some(Self {
            webhook_url,
            timeout,
        })
    }

    /// Build the MessageCard payload. Pure, so priority mapping is unit-testable.
    pub(crate) fn build_payload(notification: &Notification) -> Value {
        let facts: Vec<Value> = notification
            .metadata
            .iter()
            .map(|(key, value)| json!({ "name": key, "value": value }))
            .collect();

        json!({
            "@type": "MessageCard",
            "@context": "http://schema.org/extensions",
            "themeColor": theme_color(notification.priority),
            "summary": format!("{} Alert", notification.priority.label()),
            "title": format!("{} Alert", notification.priority.label()),
            "text": notification.message,
            "sections": [{ "facts": facts }],
        })
    }
}

#[async_trait]
impl ChannelProvider for TeamsProvider {
    async fn deliver(&self, notification: &Notification) -> AppResult<DeliveryOutcome> {
        let start = Instant::now();
        let payload = Self::build_payload(notification);

        let response = HTTP_CLIENT
            .post(&self.webhook_url)
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
                    Some(format!("Teams webhook returned {}", status_code))
                };
                Ok(DeliveryOutcome::from_status(
                    status_code,
                    success,
                    detail,
                    duration_ms,
                ))
            }
            Err(e) => Ok(DeliveryOutcome::transport_error(
                format!("Teams send failed: {}", e),
                duration_ms,
            )),
        }
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Teams
    }
}
