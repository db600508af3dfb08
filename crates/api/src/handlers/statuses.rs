//! Handlers for the `/task_statuses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;
use taskhub_db::models::status::{CreateTaskStatus, StatusResponse, UpdateTaskStatus};
use taskhub_db::repositories::StatusRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/task_statuses
pub async fn list_statuses(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StatusResponse>>> {
    let statuses = StatusRepo::list_all(&state.pool).await?;
    Ok(Json(
        statuses.into_iter().map(StatusResponse::from).collect(),
    ))
}

/// GET /api/task_statuses/{id}
pub async fn get_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    let status = StatusRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskStatus",
            id,
        }))?;

    Ok(Json(StatusResponse::from(status)))
}

/// POST /api/task_statuses
pub async fn create_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTaskStatus>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let status = StatusRepo::create(&state.pool, &input.name, &input.slug).await?;

    tracing::info!(status_id = status.id, slug = %status.slug, "Status created");

    Ok((StatusCode::CREATED, Json(StatusResponse::from(status))))
}

/// PUT /api/task_statuses/{id}
///
/// Partial update: absent fields stay untouched.
pub async fn update_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskStatus>,
) -> AppResult<Json<StatusResponse>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;

    let mut status = StatusRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskStatus",
            id,
        }))?;

    input.merge_into(&mut status);

    let saved = StatusRepo::save(&mut *tx, &status).await?;
    tx.commit().await?;

    tracing::info!(status_id = id, "Status updated");

    Ok(Json(StatusResponse::from(saved)))
}

/// DELETE /api/task_statuses/{id}
///
/// Rejected with 409 while any task still carries this status.
pub async fn delete_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    if StatusRepo::is_used_by_tasks(&mut *tx, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "TaskStatus {id} is still used by tasks"
        ))));
    }

    let deleted = StatusRepo::delete(&mut *tx, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TaskStatus",
            id,
        }));
    }

    tx.commit().await?;

    tracing::info!(status_id = id, "Status deleted");

    Ok(StatusCode::NO_CONTENT)
}
