//! Health check endpoint handlers.
//!
//! Health checks report channel configuration state without calling any
//! upstream service, so they stay cheap enough for load balancer probes.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::models::ChannelType;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::HashMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
///
/// Routes:
/// - GET /health      - Configuration health check
/// - GET /health/live - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(liveness_check))
}

/// Health check endpoint.
///
/// Reports per-channel configuration checks. The service is `degraded`
/// when no channel is configured; it always answers 200 since it can
/// still accept requests.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service health with per-channel checks", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut any_configured = false;

    for channel in ChannelType::ALL {
        let check = if state.router.is_configured(channel) {
            any_configured = true;
            ComponentHealth::configured()
        } else {
            ComponentHealth::not_configured()
        };
        checks.insert(channel.as_str().to_string(), check);
    }

    let status = if any_configured {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    })
}

/// Liveness probe endpoint.
///
/// Indicates whether the service is alive and should not be restarted.
/// This is a lightweight check that doesn't inspect any dependency.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive")
    )
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_check() {
        let result = liveness_check().await;
        assert_eq!(result, StatusCode::OK);
    }
}
