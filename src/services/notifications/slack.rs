//! Slack channel adapter.
//!
//! Sends notifications to a Slack incoming webhook as a colored attachment.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::provider::{ChannelProvider, DeliveryOutcome};
use crate::config::settings::WebhookChannelConfig;
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use crate::models::{ChannelType, Notification, PriorityLevel};

/// Slack attachment color per priority
fn attachment_color(priority: PriorityLevel) -> &'static str {
    match priority {
        PriorityLevel::Info => "good",
        PriorityLevel::Warning => "warning",
        PriorityLevel::Critical => "danger",
    }
}

/// Slack webhook adapter
pub struct SlackProvider {
    webhook_url: String,
    timeout: Duration,
}

impl SlackProvider {
    pub fn new(config: &WebhookChannelConfig, timeout: Duration) -> Option<Self> {
        let webhook_url = config.webhook_url.clone().filter(|_| config.is_configured())?;
        Some(Self {
            webhook_url,
            timeout,
        })
    }

    /// Build the webhook payload. Pure, so priority mapping is unit-testable.
    pub(crate) fn build_payload(notification: &Notification) -> Value {
        let fields: Vec<Value> = notification
            .metadata
            .iter()
            .map(|(key, value)| {
                json!({
                    "title": key,
                    "value": value,
                    "short": true,
                })
            })
            .collect();

        json!({
            "attachments": [{
                "color": attachment_color(notification.priority),
                "fallback": format!(
                    "[{}] {}",
                    notification.priority.label(),
                    notification.message
                ),
                "title": format!("{} Alert", notification.priority.label()),
                "text": notification.message,
                "fields": fields,
            }]
        })
    }
}

#[async_trait]
impl ChannelProvider for SlackProvider {
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
                    Some(format!("Slack webhook returned {}", status_code))
                };
                Ok(DeliveryOutcome::from_status(
                    status_code,
                    success,
                    detail,
                    duration_ms,
                ))
            }
            Err(e) => Ok(DeliveryOutcome::transport_error(
                format!("Slack send failed: {}", e),
                duration_ms,
            )),
        }
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Slack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_color_mapping() {
        assert_eq!(attachment_color(PriorityLevel::Info), "good");
        assert_eq!(attachment_color(PriorityLevel::Warning), "warning");
        assert_eq!(attachment_color(PriorityLevel::Critical), "danger");
    }

    #[test]
    fn test_payload_shape() {
        let notification = Notification {
            message: "deploy finished".to_string(),
            priority: PriorityLevel::Warning,
            metadata: [("env".to_string(), "staging".to_string())]
                .into_iter()
                .collect(),
            recipient: None,
        };

        let payload = SlackProvider::build_payload(&notification);
        let attachment = &payload["attachments"][0];

        assert_eq!(attachment["color"], "warning");
        assert_eq!(attachment["text"], "deploy finished");
        assert_eq!(attachment["fallback"], "[WARNING] deploy finished");
        assert_eq!(attachment["fields"][0]["title"], "env");
        assert_eq!(attachment["fields"][0]["value"], "staging");
    }
}
