//! Route definitions for authentication.
//!
//! ```text
//! POST /login -> login (open)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes mounted directly under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(auth::login))
}
