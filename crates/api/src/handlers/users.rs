//! Handlers for the `/users` resource.
//!
//! Registration is unauthenticated; everything else requires a bearer token.
//! The password is write-only: it is hashed before it touches the row and
//! never appears in a response.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskhub_core::error::CoreError;
use taskhub_core::patch::Patch;
use taskhub_core::types::DbId;
use taskhub_db::models::user::{CreateUser, UpdateUser, UserResponse};
use taskhub_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/users
///
/// Register a new user. Open endpoint (no token required).
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &input.email,
        input.first_name.as_deref(),
        input.last_name.as_deref(),
        &password_hash,
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_all(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{id}
///
/// Partial update: absent fields stay untouched. A present password is
/// hashed after the presence check and before the merge. Fetch, merge, and
/// persist run in one transaction.
pub async fn update_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;

    let mut user = UserRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if let Patch::Set(password) = &input.password {
        user.password_hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    }
    input.merge_into(&mut user);

    let saved = UserRepo::save(&mut *tx, &user).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(UserResponse::from(saved)))
}

/// DELETE /api/users/{id}
///
/// Rejected with 409 while the user is still assigned to any task.
pub async fn delete_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    if UserRepo::is_assigned_to_tasks(&mut *tx, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User {id} is still assigned to tasks"
        ))));
    }

    let deleted = UserRepo::delete(&mut *tx, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tx.commit().await?;

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
