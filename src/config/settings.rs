//! Configuration settings structures for courier-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::error::ConfigError;
use crate::logger::LogFormat;
use crate::models::ChannelType;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "courier-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_delivery_timeout() -> u64 {
    10
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_email_from() -> String {
    "courier@localhost".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Tracing subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level filter (trace, debug, info, warn, error or an EnvFilter directive)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Whether to use ANSI colors when stdout is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            colored: true,
        }
    }
}

// ============================================================================
// Delivery Configuration
// ============================================================================

/// Outbound delivery behavior shared by all channel adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Per-call timeout towards the upstream endpoint, in seconds
    #[serde(default = "default_delivery_timeout")]
    pub timeout_seconds: u64,

    /// Additional attempts after a failed delivery (0 = single attempt)
    #[serde(default)]
    pub max_retries: u32,

    /// Delay between retry attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_delivery_timeout(),
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

// ============================================================================
// Channel Configuration
// ============================================================================

/// Webhook-backed channel configuration (Discord, Slack, Teams)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookChannelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Incoming-webhook URL issued by the destination service
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl Default for WebhookChannelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook_url: None,
        }
    }
}

impl WebhookChannelConfig {
    pub fn is_configured(&self) -> bool {
        self.enabled
            && self
                .webhook_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
    }
}

/// SMS channel configuration (Twilio Messages API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsChannelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Sender phone number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,
}

impl Default for SmsChannelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            account_sid: None,
            auth_token: None,
            from_number: None,
        }
    }
}

impl SmsChannelConfig {
    pub fn is_configured(&self) -> bool {
        self.enabled
            && [&self.account_sid, &self.auth_token, &self.from_number]
                .iter()
                .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Email channel configuration (Resend HTTP API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailChannelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Provider API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    #[serde(default = "default_email_from")]
    pub from_address: String,
}

impl EmailChannelConfig {
    pub fn is_configured(&self) -> bool {
        self.enabled
            && self.api_key.as_deref().is_some_and(|s| !s.trim().is_empty())
            && !self.from_address.trim().is_empty()
    }
}

impl Default for EmailChannelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            from_address: default_email_from(),
        }
    }
}

/// Per-channel credentials and toggles.
///
/// A channel whose section is missing or incomplete is simply disabled;
/// startup never fails because a destination is unconfigured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    #[serde(default)]
    pub discord: WebhookChannelConfig,

    #[serde(default)]
    pub slack: WebhookChannelConfig,

    #[serde(default)]
    pub teams: WebhookChannelConfig,

    #[serde(default)]
    pub sms: SmsChannelConfig,

    #[serde(default)]
    pub email: EmailChannelConfig,
}

impl ChannelSettings {
    /// Whether the given channel has usable configuration.
    pub fn is_configured(&self, channel: ChannelType) -> bool {
        match channel {
            ChannelType::Discord => self.discord.is_configured(),
            ChannelType::Slack => self.slack.is_configured(),
            ChannelType::Teams => self.teams.is_configured(),
            ChannelType::Sms => self.sms.is_configured(),
            ChannelType::Email => self.email.is_configured(),
        }
    }

    /// Channels that currently have usable configuration.
    pub fn configured_channels(&self) -> Vec<ChannelType> {
        ChannelType::ALL
            .into_iter()
            .filter(|c| self.is_configured(*c))
            .collect()
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Root configuration for the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub channels: ChannelSettings,
}

impl Settings {
    /// Validate the loaded settings.
    ///
    /// Checks values that would otherwise fail at an awkward moment deep
    /// inside the server or an adapter: port 0, a zero delivery timeout,
    /// and webhook URLs that are not valid http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "port must be between 1 and 65535",
            ));
        }

        if self.delivery.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "delivery.timeout_seconds",
                "delivery timeout must be at least 1 second",
            ));
        }

        for (field, config) in [
            ("channels.discord.webhook_url", &self.channels.discord),
            ("channels.slack.webhook_url", &self.channels.slack),
            ("channels.teams.webhook_url", &self.channels.teams),
        ] {
            if let Some(raw) = config.webhook_url.as_deref().filter(|s| !s.trim().is_empty()) {
                let url = Url::parse(raw).map_err(|_| {
                    ConfigError::validation(field, "webhook URL is not a valid URL")
                })?;
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(ConfigError::validation(
                        field,
                        "webhook URL must use http or https",
                    ));
                }
            }
        }

        Ok(())
    }
}
