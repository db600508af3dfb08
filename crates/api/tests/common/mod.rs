//! Shared helpers for API integration tests.
//!
//! Builds the full application router (same middleware stack as production)
//! on top of the per-test database that `#[sqlx::test]` provides, plus small
//! request/response helpers so tests read as scenario scripts.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskhub_api::auth::jwt::{generate_access_token, JwtConfig};
use taskhub_api::config::ServerConfig;
use taskhub_api::router::build_app_router;
use taskhub_api::state::AppState;
use taskhub_core::types::DbId;
use taskhub_db::repositories::StatusRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-do-not-use-in-production".to_string(),
            token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This delegates to the same `build_app_router` that `main.rs` uses, so
/// integration tests exercise the production middleware stack (CORS,
/// request ID, timeout, tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Sign an access token for the given user with the test JWT config.
pub fn auth_token(user_id: DbId, email: &str) -> String {
    generate_access_token(user_id, email, &test_config().jwt)
        .expect("token generation must succeed")
}

/// Send a GET request without authentication.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, without authentication.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not valid JSON: {e}: {:?}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Register a user through the open registration endpoint and return its id
/// together with a signed bearer token for it.
pub async fn register_user(app: &Router, email: &str) -> (DbId, String) {
    let response = post_json(
        app.clone(),
        "/api/users",
        serde_json::json!({
            "email": email,
            "firstName": "Test",
            "lastName": "User",
            "password": "secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let id = json["id"].as_i64().expect("user response must carry an id");
    let token = auth_token(id, email);
    (id, token)
}

/// Insert the default status set directly through the repository.
///
/// `#[sqlx::test]` databases start empty, so tests that need statuses call
/// this instead of relying on the startup seeding path.
pub async fn seed_statuses(pool: &PgPool) {
    StatusRepo::seed_defaults(pool)
        .await
        .expect("seeding default statuses must succeed");
}
