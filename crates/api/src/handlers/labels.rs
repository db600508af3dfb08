//! Handlers for the `/labels` resource.
//!
//! The listing response carries an `X-Total-Count` header equal to the
//! returned array length (consumed by admin frontends).

use axum::extract::{Path, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;
use taskhub_db::models::label::{CreateLabel, LabelResponse, UpdateLabel};
use taskhub_db::repositories::LabelRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/labels
pub async fn list_labels(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let labels: Vec<LabelResponse> = LabelRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .map(LabelResponse::from)
        .collect();

    let total = labels.len().to_string();

    Ok((
        [(HeaderName::from_static("x-total-count"), total)],
        Json(labels),
    ))
}

/// GET /api/labels/{id}
pub async fn get_label(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LabelResponse>> {
    let label = LabelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Label", id }))?;

    Ok(Json(LabelResponse::from(label)))
}

/// POST /api/labels
pub async fn create_label(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLabel>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let label = LabelRepo::create(&state.pool, &input.name).await?;

    tracing::info!(label_id = label.id, "Label created");

    Ok((StatusCode::CREATED, Json(LabelResponse::from(label))))
}

/// PUT /api/labels/{id}
///
/// Partial update: an absent name stays untouched.
pub async fn update_label(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLabel>,
) -> AppResult<Json<LabelResponse>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;

    let mut label = LabelRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Label", id }))?;

    input.merge_into(&mut label);

    let saved = LabelRepo::save(&mut *tx, &label).await?;
    tx.commit().await?;

    tracing::info!(label_id = id, "Label updated");

    Ok(Json(LabelResponse::from(saved)))
}

/// DELETE /api/labels/{id}
///
/// Rejected with 409 while any task still carries this label.
pub async fn delete_label(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    if LabelRepo::is_attached_to_tasks(&mut *tx, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Label {id} is still attached to tasks"
        ))));
    }

    let deleted = LabelRepo::delete(&mut *tx, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Label", id }));
    }

    tx.commit().await?;

    tracing::info!(label_id = id, "Label deleted");

    Ok(StatusCode::NO_CONTENT)
}
