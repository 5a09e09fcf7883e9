//! Domain models for the notification router.

mod notification;

pub use notification::{
    ChannelType, DeliveryResult, DeliveryStatus, Notification, PriorityLevel, MAX_MESSAGE_LENGTH,
};
