//! Route definitions for the label resource.
//!
//! ```text
//! GET    /      -> list_labels (response carries X-Total-Count)
//! POST   /      -> create_label
//! GET    /{id}  -> get_label
//! PUT    /{id}  -> update_label
//! DELETE /{id}  -> delete_label
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::labels;
use crate::state::AppState;

/// Label routes mounted at `/labels`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(labels::list_labels).post(labels::create_label))
        .route(
            "/{id}",
            get(labels::get_label)
                .put(labels::update_label)
                .delete(labels::delete_label),
        )
}
