use utoipa::OpenApi;

pub const NOTIFICATION_TAG: &str = "Notifications";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courier",
        description = "Priority-aware notification routing service",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = NOTIFICATION_TAG, description = "Notification dispatch endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
