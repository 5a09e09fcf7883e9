//! Notification dispatch DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    ChannelType, DeliveryResult, DeliveryStatus, MAX_MESSAGE_LENGTH, Notification, PriorityLevel,
};

/// Request body for `POST /api/v1/send`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "channel": "discord",
    "message": "Deployment finished",
    "priority": "info",
    "metadata": {"environment": "production"}
}))]
pub struct SendNotificationRequest {
    /// Destination channel
    pub channel: ChannelType,

    /// Notification text
    #[validate(length(
        min = 1,
        max = 4096,
        message = "message must be between 1 and 4096 characters"
    ))]
    pub message: String,

    /// Priority level, affects per-channel presentation only
    #[serde(default)]
    pub priority: PriorityLevel,

    /// Free-form key/value pairs rendered by the channel adapter
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Destination address, required for sms and email
    #[serde(default)]
    pub recipient: Option<String>,
}

impl SendNotificationRequest {
    /// Split the request into the target channel and the internal message.
    pub fn into_notification(self) -> (ChannelType, Notification) {
        (
            self.channel,
            Notification {
                message: self.message,
                priority: self.priority,
                metadata: self.metadata,
                recipient: self.recipient,
            },
        )
    }
}

/// Response body for `POST /api/v1/send`.
///
/// Returned with 200 for any completed dispatch, including failed
/// deliveries and sends to unconfigured channels.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendNotificationResponse {
    /// Identifier minted for this request
    pub notification_id: Uuid,
    pub channel: ChannelType,
    pub success: bool,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub duration_ms: u64,
    /// Completion time (ISO 8601 format)
    #[schema(value_type = String, format = DateTime)]
    pub sent_at: String,
}

impl SendNotificationResponse {
    pub fn from_result(notification_id: Uuid, result: DeliveryResult) -> Self {
        Self {
            notification_id,
            channel: result.channel,
            success: result.success,
            status: result.status,
            detail: result.detail,
            duration_ms: result.duration_ms,
            sent_at: jiff::Timestamp::now().to_string(),
        }
    }
}

/// Entry in the `GET /api/v1/channels` listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChannelStatus {
    pub channel: ChannelType,
    pub configured: bool,
}

// Keep the request limit and the model limit in sync
const _: () = assert!(MAX_MESSAGE_LENGTH == 4096);
