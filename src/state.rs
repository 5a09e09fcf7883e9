//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::services::NotificationRouter;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since both fields are behind Arc.
#[derive(Clone)]
pub struct AppState {
    /// Notification dispatch core with the channel adapter registry
    pub router: Arc<NotificationRouter>,
    /// Loaded application settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new AppState from loaded settings.
    ///
    /// Builds the notification router (and its channel adapters) once;
    /// handlers only read from it afterwards.
    pub fn new(settings: Settings) -> Self {
        let router = NotificationRouter::from_settings(&settings);
        Self {
            router: Arc::new(router),
            settings: Arc::new(settings),
        }
    }
}
