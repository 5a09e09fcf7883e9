//! Core channel provider trait and types.
//!
//! This module provides the abstraction for channel adapters, allowing
//! easy extension to support additional notification destinations.

use crate::error::AppResult;
use crate::models::{ChannelType, Notification};
use async_trait::async_trait;

/// Result of a single delivery attempt against an upstream service
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// Whether the upstream accepted the notification
    pub success: bool,
    /// HTTP status code returned by the upstream, if a response was received
    pub status_code: Option<u16>,
    /// Upstream response body or transport error message
    pub detail: Option<String>,
    /// Time taken for the attempt in milliseconds
    pub duration_ms: u64,
}

impl DeliveryOutcome {
    /// Outcome for an attempt that received an upstream response.
    pub fn from_status(status_code: u16, success: bool, detail: Option<String>, duration_ms: u64) -> Self {
        Self {
            success,
            status_code: Some(status_code),
            detail,
            duration_ms,
        }
    }

    /// Outcome for an attempt that failed before any response arrived.
    pub fn transport_error(detail: String, duration_ms: u64) -> Self {
        Self {
            success: false,
            status_code: None,
            detail: Some(detail),
            duration_ms,
        }
    }
}

/// Trait for channel adapters (Discord, Slack, Teams, SMS, email)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All adapters must be Send + Sync for use in async contexts.
///
/// An adapter owns its resolved configuration; `deliver` performs exactly
/// one outbound call and reports the outcome instead of propagating
/// upstream failures as errors. Errors are reserved for request problems
/// the adapter detects before calling out (e.g. a missing recipient).
#[async_trait]
pub trait ChannelProvider: Send + Sync {
    /// Delivers a notification to the upstream service
    async fn deliver(&self, notification: &Notification) -> AppResult<DeliveryOutcome>;

    /// Returns the channel this adapter serves, for registry and logging
    fn channel(&self) -> ChannelType;
}
