pub mod notifications;

pub use notifications::NotificationRouter;
