//! Core notification types shared by the router, the channel adapters,
//! and the HTTP API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

// ============================================================================
// Enums
// ============================================================================

/// Third-party destination for a notification.
///
/// The channel determines which adapter handles the delivery; it never
/// affects how the message is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Discord,
    Slack,
    Teams,
    Sms,
    Email,
}

impl ChannelType {
    /// Every channel the router knows about, in a stable order.
    pub const ALL: [ChannelType; 5] = [
        ChannelType::Discord,
        ChannelType::Slack,
        ChannelType::Teams,
        ChannelType::Sms,
        ChannelType::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Discord => "discord",
            ChannelType::Slack => "slack",
            ChannelType::Teams => "teams",
            ChannelType::Sms => "sms",
            ChannelType::Email => "email",
        }
    }

    /// Whether this channel needs an explicit recipient (address or
    /// phone number) on every request.
    pub fn requires_recipient(&self) -> bool {
        matches!(self, ChannelType::Sms | ChannelType::Email)
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity hint attached to a notification.
///
/// Priority affects presentation only (colors, subject tags, urgency
/// markers); it never changes which adapter is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    #[default]
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "WARNING")]
    Warning,
    #[serde(alias = "CRITICAL")]
    Critical,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Info => "info",
            PriorityLevel::Warning => "warning",
            PriorityLevel::Critical => "critical",
        }
    }

    /// Upper-cased label used in message bodies and subjects.
    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::Info => "INFO",
            PriorityLevel::Warning => "WARNING",
            PriorityLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome class of a delivery attempt.
///
/// `NotConfigured` marks a configuration problem (no usable credentials
/// for the requested channel) as distinct from an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    Failed,
    NotConfigured,
}

// ============================================================================
// Notification
// ============================================================================

/// Maximum accepted message length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// A validated notification on its way to a single channel adapter.
///
/// Immutable once accepted; it lives only for the duration of the
/// dispatch call and is never persisted.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Message body (non-empty, at most [`MAX_MESSAGE_LENGTH`] characters).
    pub message: String,
    /// Presentation hint, mapped per adapter.
    pub priority: PriorityLevel,
    /// Free-form key/value context rendered by each adapter.
    pub metadata: HashMap<String, String>,
    /// Destination address, required only by sms and email.
    pub recipient: Option<String>,
}

// ============================================================================
// DeliveryResult
// ============================================================================

/// Result of routing one notification to one channel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryResult {
    /// Channel that was attempted.
    pub channel: ChannelType,
    /// True when the upstream API accepted the message.
    pub success: bool,
    /// Outcome class, distinguishing configuration problems from
    /// upstream failures.
    pub status: DeliveryStatus,
    /// Upstream status or error detail when the delivery failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Total time spent in the adapter, in milliseconds.
    pub duration_ms: u64,
}

impl DeliveryResult {
    pub fn delivered(channel: ChannelType, duration_ms: u64) -> Self {
        Self {
            channel,
            success: true,
            status: DeliveryStatus::Delivered,
            detail: None,
            duration_ms,
        }
    }

    pub fn failed(channel: ChannelType, detail: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            channel,
            success: false,
            status: DeliveryStatus::Failed,
            detail: Some(detail.into()),
            duration_ms,
        }
    }

    pub fn not_configured(channel: ChannelType) -> Self {
        Self {
            channel,
            success: false,
            status: DeliveryStatus::NotConfigured,
            detail: Some(format!("{} channel is not configured", channel)),
            duration_ms: 0,
        }
    }
}
