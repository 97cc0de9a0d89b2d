use serde::{Deserialize, Serialize};

pub const API_TITLE: &str = "Fish-Net API";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response type for the root endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

impl RootResponse {
    pub fn running() -> Self {
        RootResponse {
            message: format!("{} is running", API_TITLE),
            version: API_VERSION.to_string(),
        }
    }
}

/// Response type for health check endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        HealthResponse {
            status: "healthy".to_string(),
        }
    }
}
