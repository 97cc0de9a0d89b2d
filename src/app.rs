use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::Config;
use crate::handlers;
use crate::routes;

/// Builds the application router for the given configuration.
///
/// The router is self-contained: `main` serves it, and tests drive it with
/// `oneshot` without opening a socket.
pub fn build_app(config: &Config) -> Router {
    let router = Router::new()
        .route(routes::ROOT, get(handlers::root_handler))
        .route(routes::HEALTH, get(handlers::health_handler))
        .merge(SwaggerUi::new(routes::DOCS).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(handlers::not_found_handler)
        .method_not_allowed_fallback(handlers::method_not_allowed_handler);

    config
        .cors
        .apply(router)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cors::CorsConfig;
    use crate::error::ErrorResponse;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tokio::task::JoinSet;
    use tower::ServiceExt;

    fn open_config() -> Config {
        Config {
            cors: CorsConfig {
                allow_credentials: false,
                ..CorsConfig::permissive()
            },
            ..Config::default()
        }
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health_bodies() {
        let app = build_app(&Config::default());

        let root = app.clone().oneshot(request("GET", "/")).await.unwrap();
        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(
            json_body(root).await,
            json!({"message": "Fish-Net API is running", "version": "0.5.0"})
        );

        let health = app.oneshot(request("GET", "/api/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(json_body(health).await, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_open_cors_sends_wildcard_origin() {
        let app = build_app(&open_config());

        for uri in ["/", "/api/health"] {
            let response = app.clone().oneshot(request("GET", uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
                "*"
            );
        }
    }

    #[tokio::test]
    async fn test_permissive_cors_sends_star_and_credentials() {
        let config = Config {
            cors: CorsConfig::permissive(),
            ..Config::default()
        };
        let app = build_app(&config);

        for uri in ["/", "/api/health"] {
            let response = app.clone().oneshot(request("GET", uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
                "*"
            );
            assert_eq!(
                response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
                "true"
            );
        }
    }

    #[tokio::test]
    async fn test_permissive_cors_mirrors_origin_for_cookie_requests() {
        let config = Config {
            cors: CorsConfig::permissive(),
            ..Config::default()
        };
        let response = build_app(&config)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::COOKIE, "session=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_default_cors_sends_no_origin() {
        let response = build_app(&Config::default())
            .oneshot(request("GET", "/api/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_preflight_is_answered() {
        let response = build_app(&open_config())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = build_app(&open_config())
            .oneshot(request("GET", "/nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.detail, "Not Found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_allowed() {
        let response = build_app(&Config::default())
            .oneshot(request("POST", "/api/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(response).await, json!({"detail": "Method Not Allowed"}));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = build_app(&Config::default())
            .oneshot(request("GET", "/openapi.json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert_eq!(doc["info"]["title"], "Fish-Net API");
        assert_eq!(doc["info"]["version"], "0.5.0");
        assert!(doc["paths"].get("/api/health").is_some());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let app = build_app(&open_config());
        let mut tasks = JoinSet::new();

        for i in 0..32 {
            let app = app.clone();
            let uri = if i % 2 == 0 { "/" } else { "/api/health" };
            tasks.spawn(async move {
                let response = app.oneshot(request("GET", uri)).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                (uri, json_body(response).await)
            });
        }

        while let Some(result) = tasks.join_next().await {
            let (uri, body) = result.unwrap();
            let expected = match uri {
                "/" => json!({"message": "Fish-Net API is running", "version": "0.5.0"}),
                _ => json!({"status": "healthy"}),
            };
            assert_eq!(body, expected);
        }
    }
}
