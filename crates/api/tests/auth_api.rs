//! Integration tests for `POST /api/login` and bearer-token enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: valid credentials return a usable token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_valid_credentials_returns_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "jane@example.com").await;

    let response = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({"email": "jane@example.com", "password": "secret"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("response must carry a token");

    // The issued token must be accepted by a protected endpoint.
    let response = get_auth(app, "/api/tasks", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: wrong password returns 401 without revealing which part was wrong
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "jane@example.com").await;

    let response = post_json(
        app,
        "/api/login",
        serde_json::json!({"email": "jane@example.com", "password": "wrong"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Test: unknown email gets the same message as a wrong password
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_unknown_email_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/login",
        serde_json::json!({"email": "nobody@example.com", "password": "secret"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Test: protected endpoints reject missing and malformed tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/tasks").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_with_garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/tasks", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: registration stays open while the rest of /users is protected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn registration_is_open_but_listing_users_is_not(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/users",
        serde_json::json!({"email": "new@example.com", "password": "secret"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
