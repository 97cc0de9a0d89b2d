use crate::error::ApiError;
use axum::http::{Method, Uri};

/// Fallback for paths with no route
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Fallback for known paths hit with a method they don't accept
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(method, uri.path().to_string())
}
