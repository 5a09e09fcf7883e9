//! Discord channel adapter.
//!
//! Sends notifications to a Discord incoming webhook as a single embed.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::provider::{ChannelProvider, DeliveryOutcome};
use crate::config::settings::WebhookChannelConfig;
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use crate::models::{ChannelType, Notification, PriorityLevel};

/// Discord embed color per priority
fn embed_color(priority: PriorityLevel) -> u32 {
    match priority {
        PriorityLevel::Info => 0x3498DB,     // Blue
        PriorityLevel::Warning => 0xF39C12,  // Orange
        PriorityLevel::Critical => 0xE74C3C, // Red
    }
}

/// Title emoji per priority
fn priority_emoji(priority: PriorityLevel) -> &'static str {
    match priority {
        PriorityLevel::Info => "\u{2139}\u{fe0f}",
        PriorityLevel::Warning => "\u{26a0}\u{fe0f}",
        PriorityLevel::Critical => "\u{1f6a8}",
    }
}

/// Render a metadata key as a human-readable field name
/// ("error_rate" -> "Error Rate")
fn field_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Discord webhook adapter
pub struct DiscordProvider {
    webhook_url: String,
    timeout: Duration,
}

impl DiscordProvider {
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
                    "name": field_name(key),
                    "value": value,
                    "inline": true,
                })
            })
            .collect();

        json!({
            "embeds": [{
                "title": format!(
                    "{} {} Alert",
                    priority_emoji(notification.priority),
                    notification.priority.label()
                ),
                "description": notification.message,
                "color": embed_color(notification.priority),
                "timestamp": jiff::Timestamp::now().to_string(),
                "fields": fields,
            }]
        })
    }
}

#[async_trait]
impl ChannelProvider for DiscordProvider {
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
                    Some(format!("Discord webhook returned {}", status_code))
                };
                Ok(DeliveryOutcome::from_status(
                    status_code,
                    success,
                    detail,
                    duration_ms,
                ))
            }
            Err(e) => Ok(DeliveryOutcome::transport_error(
                format!("Discord send failed: {}", e),
                duration_ms,
            )),
        }
    }

    fn channel(&self) -> ChannelType {
        ChannelType::Discord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(priority: PriorityLevel) -> Notification {
        Notification {
            message: "disk usage above threshold".to_string(),
            priority,
            metadata: [("error_rate".to_string(), "0.42".to_string())]
                .into_iter()
                .collect(),
            recipient: None,
        }
    }

    #[test]
    fn test_embed_color_mapping() {
        assert_eq!(embed_color(PriorityLevel::Info), 0x3498DB);
        assert_eq!(embed_color(PriorityLevel::Warning), 0xF39C12);
        assert_eq!(embed_color(PriorityLevel::Critical), 0xE74C3C);
    }

    #[test]
    fn test_payload_shape() {
        let payload = DiscordProvider::build_payload(&notification(PriorityLevel::Critical));
        let embed = &payload["embeds"][0];

        assert_eq!(embed["description"], "disk usage above threshold");
        assert_eq!(embed["color"], 0xE74C3C);
        assert!(embed["title"].as_str().unwrap().contains("CRITICAL"));
        assert_eq!(embed["fields"][0]["name"], "Error Rate");
        assert_eq!(embed["fields"][0]["value"], "0.42");
        assert_eq!(embed["fields"][0]["inline"], true);
    }

    #[test]
    fn test_field_name_title_case() {
        assert_eq!(field_name("error_rate"), "Error Rate");
        assert_eq!(field_name("host"), "Host");
        assert_eq!(field_name("a__b"), "A B");
    }

    #[test]
    fn test_provider_requires_configuration() {
        let config = WebhookChannelConfig {
            enabled: true,
            webhook_url: None,
        };
        assert!(DiscordProvider::new(&config, Duration::from_secs(10)).is_none());

        let configured = WebhookChannelConfig {
            enabled: true,
            webhook_url: Some("https://discord.com/api/webhooks/1/abc".to_string()),
        };
        assert!(DiscordProvider::new(&configured, Duration::from_secs(10)).is_some());
    }
}
