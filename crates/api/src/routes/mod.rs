//! Route definitions, one module per resource plus the root health check.

pub mod auth;
pub mod health;
pub mod labels;
pub mod statuses;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All `/api` routes merged into a single router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/labels", labels::router())
        .nest("/task_statuses", statuses::router())
        .nest("/tasks", tasks::router())
}
