//! Route definitions for the task status resource.
//!
//! ```text
//! GET    /      -> list_statuses
//! POST   /      -> create_status
//! GET    /{id}  -> get_status
//! PUT    /{id}  -> update_status
//! DELETE /{id}  -> delete_status
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::statuses;
use crate::state::AppState;

/// Status routes mounted at `/task_statuses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(statuses::list_statuses).post(statuses::create_status),
        )
        .route(
            "/{id}",
            get(statuses::get_status)
                .put(statuses::update_status)
                .delete(statuses::delete_status),
        )
}
