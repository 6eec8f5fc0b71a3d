//! API routes module
//!
//! This module defines all HTTP API routes of the instance API.

pub mod health;
pub mod instance;

use axum::Router;

use crate::config::Config;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(config: &Config) -> Router {
    Router::new()
        .nest("/instance", instance::router(config))
        .merge(health::router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn config() -> Config {
        temp_env::with_vars_unset(
            ["MONGODB_CONNECT_TIMEOUT_SECS", "NEO4J_CONNECTION_TIMEOUT_SECS"],
            || Config::from_env().unwrap(),
        )
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ready_route() {
        let response = routes(&config())
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["ready"], true);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn test_check_connection_is_mounted_under_instance() {
        let request = Request::builder()
            .method("POST")
            .uri("/instance/check-connection")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = routes(&config()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusMessage"], "Unprocessable entity");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_options_route() {
        let response = routes(&config())
            .oneshot(
                Request::builder()
                    .uri("/instance/options")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
