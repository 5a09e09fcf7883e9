//! Notification dispatch core.
//!
//! The router holds one adapter per configured channel, validates the
//! request, dispatches exactly one channel, and optionally retries
//! failed deliveries within the configured bounds.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::discord::DiscordProvider;
use super::email::EmailProvider;
use super::provider::{ChannelProvider, DeliveryOutcome};
use super::slack::SlackProvider;
use super::sms::SmsProvider;
use super::teams::TeamsProvider;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{ChannelType, DeliveryResult, MAX_MESSAGE_LENGTH, Notification};

/// Routes notifications to the adapter registered for a channel.
///
/// Built once at startup; channels without usable configuration simply
/// have no registered adapter, and sends to them return a
/// `not_configured` result without any network activity.
pub struct NotificationRouter {
    providers: HashMap<ChannelType, Arc<dyn ChannelProvider>>,
    max_retries: u32,
    retry_delay: Duration,
}

impl NotificationRouter {
    /// Build the adapter registry from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let timeout = Duration::from_secs(settings.delivery.timeout_seconds);
        let mut providers: HashMap<ChannelType, Arc<dyn ChannelProvider>> = HashMap::new();

        if let Some(p) = DiscordProvider::new(&settings.channels.discord, timeout) {
            providers.insert(ChannelType::Discord, Arc::new(p));
        }
        if let Some(p) = SlackProvider::new(&settings.channels.slack, timeout) {
            providers.insert(ChannelType::Slack, Arc::new(p));
        }
        if let Some(p) = TeamsProvider::new(&settings.channels.teams, timeout) {
            providers.insert(ChannelType::Teams, Arc::new(p));
        }
        if let Some(p) = SmsProvider::new(&settings.channels.sms, timeout) {
            providers.insert(ChannelType::Sms, Arc::new(p));
        }
        if let Some(p) = EmailProvider::new(
            &settings.channels.email,
            &settings.application.name,
            timeout,
        ) {
            providers.insert(ChannelType::Email, Arc::new(p));
        }

        info!(
            configured = ?providers.keys().collect::<Vec<_>>(),
            "notification router initialized"
        );

        Self {
            providers,
            max_retries: settings.delivery.max_retries,
            retry_delay: Duration::from_millis(settings.delivery.retry_delay_ms),
        }
    }

    /// Build a router over explicit providers, used by tests.
    #[cfg(test)]
    pub fn with_providers(
        providers: HashMap<ChannelType, Arc<dyn ChannelProvider>>,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            providers,
            max_retries,
            retry_delay,
        }
    }

    /// Whether the given channel has a registered adapter.
    pub fn is_configured(&self, channel: ChannelType) -> bool {
        self.providers.contains_key(&channel)
    }

    /// Channels with a registered adapter, in declaration order.
    pub fn configured_channels(&self) -> Vec<ChannelType> {
        ChannelType::ALL
            .into_iter()
            .filter(|c| self.is_configured(*c))
            .collect()
    }

    /// Validate a notification against the target channel.
    fn validate(&self, channel: ChannelType, notification: &Notification) -> AppResult<()> {
        if notification.message.trim().is_empty() {
            return Err(AppError::validation("message", "message must not be empty"));
        }
        if notification.message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(AppError::validation(
                "message",
                format!("message exceeds {} characters", MAX_MESSAGE_LENGTH),
            ));
        }
        if channel.requires_recipient()
            && notification
                .recipient
                .as_deref()
                .is_none_or(|r| r.trim().is_empty())
        {
            return Err(AppError::validation(
                "recipient",
                format!("recipient is required for the {} channel", channel),
            ));
        }
        Ok(())
    }

    /// Dispatch a notification to exactly one channel.
    ///
    /// Upstream failures are reported in the `DeliveryResult`, never as an
    /// error; `Err` is reserved for request validation problems.
    pub async fn send(
        &self,
        channel: ChannelType,
        notification: &Notification,
    ) -> AppResult<DeliveryResult> {
        self.validate(channel, notification)?;

        let Some(provider) = self.providers.get(&channel) else {
            warn!(%channel, "send to unconfigured channel");
            return Ok(DeliveryResult::not_configured(channel));
        };

        let mut outcome = provider.deliver(notification).await?;
        let mut attempt = 1u32;

        while !outcome.success && attempt <= self.max_retries {
            warn!(
                %channel,
                attempt,
                max_retries = self.max_retries,
                detail = outcome.detail.as_deref().unwrap_or(""),
                "delivery failed, retrying"
            );
            tokio::time::sleep(self.retry_delay).await;
            outcome = provider.deliver(notification).await?;
            attempt += 1;
        }

        Ok(Self::into_result(channel, outcome))
    }

    fn into_result(channel: ChannelType, outcome: DeliveryOutcome) -> DeliveryResult {
        if outcome.success {
            info!(%channel, duration_ms = outcome.duration_ms, "notification delivered");
            DeliveryResult::delivered(channel, outcome.duration_ms)
        } else {
            let detail = outcome
                .detail
                .unwrap_or_else(|| "delivery failed".to_string());
            warn!(%channel, detail, "notification delivery failed");
            DeliveryResult::failed(channel, detail, outcome.duration_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryStatus, PriorityLevel};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock provider with a scripted outcome sequence
    struct MockProvider {
        channel: ChannelType,
        // Fails for the first `fail_attempts` calls, then succeeds
        fail_attempts: u32,
        calls: AtomicU32,
    }

    impl MockProvider {
        fn succeeding(channel: ChannelType) -> Self {
            Self {
                channel,
                fail_attempts: 0,
                calls: AtomicU32::new(0),
            }
        }

        fn failing(channel: ChannelType) -> Self {
            Self {
                channel,
                fail_attempts: u32::MAX,
                calls: AtomicU32::new(0),
            }
        }

        fn failing_then_succeeding(channel: ChannelType, fail_attempts: u32) -> Self {
            Self {
                channel,
                fail_attempts,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl ChannelProvider for MockProvider {
        async fn deliver(&self, _notification: &Notification) -> AppResult<DeliveryOutcome> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_attempts {
                Ok(DeliveryOutcome::from_status(
                    500,
                    false,
                    Some("upstream returned 500".to_string()),
                    3,
                ))
            } else {
                Ok(DeliveryOutcome::from_status(204, true, None, 5))
            }
        }

        fn channel(&self) -> ChannelType {
            self.channel
        }
    }

    fn notification(message: &str) -> Notification {
        Notification {
            message: message.to_string(),
            priority: PriorityLevel::Info,
            metadata: Default::default(),
            recipient: None,
        }
    }

    fn router_with(provider: MockProvider, max_retries: u32) -> NotificationRouter {
        let channel = provider.channel();
        let mut providers: HashMap<ChannelType, Arc<dyn ChannelProvider>> = HashMap::new();
        providers.insert(channel, Arc::new(provider));
        NotificationRouter::with_providers(providers, max_retries, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_send_success() {
        let router = router_with(MockProvider::succeeding(ChannelType::Discord), 0);

        let result = router
            .send(ChannelType::Discord, &notification("hi"))
            .await
            .unwrap();

        assert_eq!(result.channel, ChannelType::Discord);
        assert!(result.success);
        assert_eq!(result.status, DeliveryStatus::Delivered);
        assert!(result.detail.is_none());
    }

    #[tokio::test]
    async fn test_send_upstream_failure_does_not_error() {
        let router = router_with(MockProvider::failing(ChannelType::Slack), 0);

        let result = router
            .send(ChannelType::Slack, &notification("hi"))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.status, DeliveryStatus::Failed);
        assert!(result.detail.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_send_to_unconfigured_channel() {
        let router = NotificationRouter::with_providers(
            HashMap::new(),
            0,
            Duration::from_millis(1),
        );

        let result = router
            .send(ChannelType::Teams, &notification("hi"))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.status, DeliveryStatus::NotConfigured);
        assert!(!router.is_configured(ChannelType::Teams));
    }

    #[tokio::test]
    async fn test_empty_message_rejected_before_dispatch() {
        let router = router_with(MockProvider::succeeding(ChannelType::Discord), 0);

        let result = router.send(ChannelType::Discord, &notification("   ")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_oversized_message_rejected() {
        let router = router_with(MockProvider::succeeding(ChannelType::Discord), 0);
        let long = "x".repeat(MAX_MESSAGE_LENGTH + 1);

        let result = router.send(ChannelType::Discord, &notification(&long)).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_recipient_required_for_sms() {
        let router = router_with(MockProvider::succeeding(ChannelType::Sms), 0);

        let result = router.send(ChannelType::Sms, &notification("hi")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_retry_until_success() {
        let provider = MockProvider::failing_then_succeeding(ChannelType::Discord, 2);
        let router = router_with(provider, 2);

        let result = router
            .send(ChannelType::Discord, &notification("hi"))
            .await
            .unwrap();

        assert!(result.success);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let mut providers: HashMap<ChannelType, Arc<dyn ChannelProvider>> = HashMap::new();
        let provider = Arc::new(MockProvider::failing_then_succeeding(
            ChannelType::Discord,
            1,
        ));
        providers.insert(ChannelType::Discord, provider.clone());
        let router =
            NotificationRouter::with_providers(providers, 0, Duration::from_millis(1));

        let result = router
            .send(ChannelType::Discord, &notification("hi"))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_sends_are_independent() {
        let mut providers: HashMap<ChannelType, Arc<dyn ChannelProvider>> = HashMap::new();
        providers.insert(
            ChannelType::Discord,
            Arc::new(MockProvider::succeeding(ChannelType::Discord)),
        );
        providers.insert(
            ChannelType::Slack,
            Arc::new(MockProvider::failing(ChannelType::Slack)),
        );
        let router = Arc::new(NotificationRouter::with_providers(
            providers,
            0,
            Duration::from_millis(1),
        ));

        let a = {
            let router = router.clone();
            tokio::spawn(async move { router.send(ChannelType::Discord, &notification("a")).await })
        };
        let b = {
            let router = router.clone();
            tokio::spawn(async move { router.send(ChannelType::Slack, &notification("b")).await })
        };

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert!(a.success);
        assert!(!b.success);
    }

    #[tokio::test]
    async fn test_configured_channels_order() {
        let mut providers: HashMap<ChannelType, Arc<dyn ChannelProvider>> = HashMap::new();
        providers.insert(
            ChannelType::Email,
            Arc::new(MockProvider::succeeding(ChannelType::Email)),
        );
        providers.insert(
            ChannelType::Discord,
            Arc::new(MockProvider::succeeding(ChannelType::Discord)),
        );
        let router =
            NotificationRouter::with_providers(providers, 0, Duration::from_millis(1));

        assert_eq!(
            router.configured_channels(),
            vec![ChannelType::Discord, ChannelType::Email]
        );
    }
}
