use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{HealthResponse, RootResponse};

/// OpenAPI documentation
///
/// `info` must agree with `models::API_TITLE`, the crate version and the crate
/// description; `test_info_matches_service_metadata` keeps them aligned.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fish-Net API",
        version = "0.5.0",
        description = "AI-agent-based role assignment and training support solution"
    ),
    paths(
        handlers::root::root_handler,
        handlers::health::health_handler
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "meta", description = "Service information"),
        (name = "health", description = "Health check operations")
    )
)]
pub struct ApiDoc;
