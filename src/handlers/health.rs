use crate::models::HealthResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET /api/health handler - Liveness probe
///
/// Answers as long as the process is serving requests. No dependency is
/// checked, so a 200 here says nothing about downstream services.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    tracing::debug!("Health check passed");
    (StatusCode::OK, Json(HealthResponse::healthy()))
}
