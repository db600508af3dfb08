//! Handlers for the `/tasks` resource.
//!
//! Create and update resolve denormalized reference fields (status slug,
//! assignee id, label ids) inside the same transaction that persists the
//! row, so a bad reference can never leave a partially-updated task behind.
//! Creation is the degenerate case of update against a blank entity: both go
//! through the same resolution helpers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgConnection;
use taskhub_core::error::CoreError;
use taskhub_core::patch::Patch;
use taskhub_core::types::DbId;
use taskhub_db::models::status::TaskStatus;
use taskhub_db::models::task::{CreateTask, TaskFilter, TaskResponse, UpdateTask};
use taskhub_db::repositories::{LabelRepo, StatusRepo, TaskRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/tasks
///
/// List tasks, optionally filtered by `titleCont`, `assigneeId`, `status`
/// (slug), and `labelId` -- present criteria combine as a logical AND. An
/// empty filter bypasses the predicate builder entirely and takes the
/// unfiltered path.
pub async fn list_tasks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let tasks = if filter.is_empty() {
        TaskRepo::list_all(&state.pool).await?
    } else {
        TaskRepo::list_filtered(&state.pool, &filter).await?
    };

    // Bulk-load label associations, then project in the original fetch order.
    let task_ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
    let mut labels_by_task: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (task_id, label_id) in TaskRepo::label_ids_for_tasks(&state.pool, &task_ids).await? {
        labels_by_task.entry(task_id).or_default().push(label_id);
    }

    let responses = tasks
        .into_iter()
        .map(|task| {
            let label_ids = labels_by_task.remove(&task.id).unwrap_or_default();
            TaskResponse::project(task, label_ids)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let label_ids = TaskRepo::label_ids_for_task(&state.pool, task.id).await?;

    Ok(Json(TaskResponse::project(task, label_ids)))
}

/// POST /api/tasks
///
/// Create a task. The status slug is required and must resolve; assignee and
/// labels are optional but must resolve when given. Nothing is persisted if
/// any reference fails.
pub async fn create_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;

    let status = resolve_status(&mut tx, &input.status).await?;
    if let Some(assignee_id) = input.assignee_id {
        resolve_assignee(&mut tx, assignee_id).await?;
    }
    let label_ids = resolve_label_ids(&mut tx, &input.task_label_ids).await?;

    let task = TaskRepo::insert(
        &mut tx,
        &input.title,
        input.index,
        input.content.as_deref(),
        status.id,
        input.assignee_id,
    )
    .await?;

    TaskRepo::set_labels(&mut tx, task.id, &label_ids).await?;

    tx.commit().await?;

    tracing::info!(task_id = task.id, status = %status.slug, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse::project(task, label_ids)),
    ))
}

/// PUT /api/tasks/{id}
///
/// Partial update: absent fields stay untouched; a present `taskLabelIds`
/// replaces the whole label set (`[]` removes all labels). Scalar validation
/// happens before the transaction touches anything; reference resolution and
/// the merge commit or roll back together.
pub async fn update_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskResponse>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;

    let mut task = TaskRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let UpdateTask {
        title,
        index,
        content,
        status,
        assignee_id,
        task_label_ids,
    } = input;

    title.apply_to(&mut task.name);
    index.apply_to(&mut task.index);
    content.apply_to(&mut task.description);

    if let Patch::Set(slug) = status {
        let status = resolve_status(&mut tx, &slug).await?;
        task.status_id = status.id;
        task.status_slug = status.slug;
    }

    match assignee_id {
        Patch::Unset => {}
        Patch::Set(None) => task.assignee_id = None,
        Patch::Set(Some(user_id)) => {
            resolve_assignee(&mut tx, user_id).await?;
            task.assignee_id = Some(user_id);
        }
    }

    let saved = TaskRepo::save(&mut tx, &task).await?;

    let label_ids = match task_label_ids {
        Patch::Set(requested) => {
            let resolved = resolve_label_ids(&mut tx, &requested).await?;
            TaskRepo::set_labels(&mut tx, saved.id, &resolved).await?;
            resolved
        }
        Patch::Unset => TaskRepo::label_ids_for_task(&mut *tx, saved.id).await?,
    };

    tx.commit().await?;

    tracing::info!(task_id = id, "Task updated");

    Ok(Json(TaskResponse::project(saved, label_ids)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Reference resolution
// ---------------------------------------------------------------------------

/// Resolve a status slug to its row, or fail with `ReferenceNotFound`.
async fn resolve_status(conn: &mut PgConnection, slug: &str) -> Result<TaskStatus, AppError> {
    StatusRepo::find_by_slug(&mut *conn, slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::reference_not_found("TaskStatus", slug)))
}

/// Check that an assignee id resolves to a user, or fail with
/// `ReferenceNotFound`.
async fn resolve_assignee(conn: &mut PgConnection, user_id: DbId) -> Result<(), AppError> {
    UserRepo::find_by_id(&mut *conn, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::Core(CoreError::reference_not_found("User", user_id)))
}

/// Resolve the requested label ids, failing with `ReferenceNotFound` on the
/// first id that does not exist. Returns the deduplicated, sorted id set.
async fn resolve_label_ids(
    conn: &mut PgConnection,
    requested: &[DbId],
) -> Result<Vec<DbId>, AppError> {
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let mut wanted: Vec<DbId> = requested.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let found = LabelRepo::find_by_ids(&mut *conn, &wanted).await?;
    if found.len() != wanted.len() {
        let missing = wanted
            .iter()
            .find(|id| !found.iter().any(|label| label.id == **id))
            .copied()
            .unwrap_or_default();
        return Err(AppError::Core(CoreError::reference_not_found(
            "Label", missing,
        )));
    }

    Ok(wanted)
}
