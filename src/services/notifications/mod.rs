//! Notification delivery: channel adapters and the dispatch router.

pub mod discord;
pub mod email;
pub mod provider;
pub mod router;
pub mod slack;
pub mod sms;
pub mod teams;

pub use provider::{ChannelProvider, DeliveryOutcome};
pub use router::NotificationRouter;
