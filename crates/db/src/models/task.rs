//! Task entity model, wire DTOs, and the listing filter.
//!
//! The wire shape denormalizes relations to scalars: `status` is the status
//! slug, `assigneeId` is the assignee's id (or null), and `taskLabelIds` is
//! the set of label ids (empty list, never null). `title`/`content` map onto
//! the stored `name`/`description` columns.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::error::CoreError;
use taskhub_core::patch::Patch;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// Task row as fetched by the repository (joined with `task_statuses` so the
/// slug is always available for projection).
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub index: Option<i32>,
    pub description: Option<String>,
    pub status_id: DbId,
    pub status_slug: String,
    pub assignee_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Task representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: DbId,
    pub index: Option<i32>,
    pub created_at: Timestamp,
    pub assignee_id: Option<DbId>,
    pub title: String,
    pub content: Option<String>,
    pub status: String,
    pub task_label_ids: Vec<DbId>,
}

impl TaskResponse {
    /// Project a task row plus its label ids into the wire shape.
    pub fn project(task: Task, mut label_ids: Vec<DbId>) -> Self {
        label_ids.sort_unstable();
        Self {
            id: task.id,
            index: task.index,
            created_at: task.created_at,
            assignee_id: task.assignee_id,
            title: task.name,
            content: task.description,
            status: task.status_slug,
            task_label_ids: label_ids,
        }
    }
}

/// Request body for `POST /api/tasks`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(length(min = 1, message = "title must not be blank"))]
    pub title: String,
    pub index: Option<i32>,
    pub content: Option<String>,
    #[validate(length(min = 1, message = "status must not be blank"))]
    pub status: String,
    pub assignee_id: Option<DbId>,
    #[serde(default)]
    pub task_label_ids: Vec<DbId>,
}

/// Request body for `PUT /api/tasks/{id}`.
///
/// Absent fields leave the stored value alone. `content`, `index`, and
/// `assigneeId` are nullable, so an explicit `null` clears them. A present
/// `taskLabelIds` replaces the whole label set; `[]` removes all labels.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub index: Patch<Option<i32>>,
    #[serde(default)]
    pub content: Patch<Option<String>>,
    #[serde(default)]
    pub status: Patch<String>,
    #[serde(default)]
    pub assignee_id: Patch<Option<DbId>>,
    #[serde(default)]
    pub task_label_ids: Patch<Vec<DbId>>,
}

impl UpdateTask {
    /// Validate all present scalar fields before any mutation is applied.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Patch::Set(title) = &self.title {
            if title.trim().is_empty() {
                return Err(CoreError::Validation("title must not be blank".into()));
            }
        }
        if let Patch::Set(status) = &self.status {
            if status.trim().is_empty() {
                return Err(CoreError::Validation("status must not be blank".into()));
            }
        }
        Ok(())
    }
}

/// Sparse listing filter parsed from `GET /api/tasks` query parameters.
///
/// Criteria combine as a logical AND; absent criteria impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Case-insensitive substring match on the task title.
    pub title_cont: Option<String>,
    /// Exact match on the assignee's id.
    pub assignee_id: Option<DbId>,
    /// Exact match on the status slug.
    pub status: Option<String>,
    /// Task has a label with this id.
    pub label_id: Option<DbId>,
}

impl TaskFilter {
    /// `true` when no criterion is present, so the caller can skip the
    /// predicate builder and take the unfiltered (join-free) listing path.
    pub fn is_empty(&self) -> bool {
        self.title_cont.is_none()
            && self.assignee_id.is_none()
            && self.status.is_none()
            && self.label_id.is_none()
    }
}
