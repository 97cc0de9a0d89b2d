use crate::models::RootResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET / handler - Service banner
///
/// Reports that the API is up along with its version.
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    ),
    tag = "meta"
)]
pub async fn root_handler() -> (StatusCode, Json<RootResponse>) {
    (StatusCode::OK, Json(RootResponse::running()))
}
