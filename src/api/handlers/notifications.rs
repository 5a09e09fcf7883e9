//! Notification API handlers.
//!
//! Provides HTTP handlers for dispatching notifications and inspecting
//! channel configuration.

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{ChannelStatus, SendNotificationRequest, SendNotificationResponse};
use crate::error::AppResult;
use crate::models::ChannelType;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{Json, extract::State};
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates notification-related routes.
///
/// Routes:
/// - POST /send     - Dispatch a notification to one channel
/// - GET /channels  - List channels and their configuration state
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(send_notification))
        .routes(routes!(list_channels))
}

/// POST /api/v1/send - Dispatch a notification
///
/// Validates the request, routes it to the selected channel adapter, and
/// reports the delivery outcome. Upstream failures and unconfigured
/// channels are reported in the 200 body with `success: false`; only
/// request validation problems produce a 400.
#[utoipa::path(
    post,
    path = "/send",
    tag = NOTIFICATION_TAG,
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Dispatch completed", body = SendNotificationResponse),
        (status = 400, description = "Invalid request", body = crate::api::dto::ErrorResponse)
    )
)]
async fn send_notification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendNotificationRequest>,
) -> AppResult<Json<SendNotificationResponse>> {
    let notification_id = Uuid::new_v4();
    let (channel, notification) = payload.into_notification();

    info!(
        %notification_id,
        %channel,
        priority = %notification.priority,
        "dispatching notification"
    );

    let result = state.router.send(channel, &notification).await?;

    Ok(Json(SendNotificationResponse::from_result(
        notification_id,
        result,
    )))
}

/// GET /api/v1/channels - List channels
///
/// Returns all supported channels with their configuration state.
#[utoipa::path(
    get,
    path = "/channels",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Channel configuration listing", body = [ChannelStatus])
    )
)]
async fn list_channels(State(state): State<AppState>) -> Json<Vec<ChannelStatus>> {
    let channels = ChannelType::ALL
        .into_iter()
        .map(|channel| ChannelStatus {
            channel,
            configured: state.router.is_configured(channel),
        })
        .collect();

    Json(channels)
}
