use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Custom error type for API endpoints
///
/// Every failure the service answers itself goes through this type so that
/// clients always get a JSON body with a `detail` field.
#[derive(Debug)]
pub enum ApiError {
    /// No route matches the request path
    NotFound(String),
    /// The path exists but does not accept this method
    MethodNotAllowed(Method, String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(..) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::NotFound(path) => {
                tracing::debug!("No route for path: {}", path);
            }
            ApiError::MethodNotAllowed(method, path) => {
                tracing::debug!("Method {} not allowed on path: {}", method, path);
            }
        }

        let body = Json(ErrorResponse {
            detail: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
        });

        (status, body).into_response()
    }
}
