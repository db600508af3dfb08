//! Task status entity model and DTOs.
//!
//! The slug is the wire-level representation of a status: tasks reference
//! statuses by slug in every request and response, never by numeric id.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::error::CoreError;
use taskhub_core::patch::Patch;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// Status slugs seeded on first startup when the table is empty.
pub const DEFAULT_STATUSES: &[(&str, &str)] = &[
    ("Draft", "draft"),
    ("To review", "to_review"),
    ("To be fixed", "to_be_fixed"),
    ("To publish", "to_publish"),
    ("Published", "published"),
];

/// Full status row from the `task_statuses` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskStatus {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

/// Status representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

impl From<TaskStatus> for StatusResponse {
    fn from(status: TaskStatus) -> Self {
        Self {
            id: status.id,
            name: status.name,
            slug: status.slug,
            created_at: status.created_at,
        }
    }
}

/// Request body for `POST /api/task_statuses`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskStatus {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "slug must be between 1 and 100 characters"))]
    pub slug: String,
}

/// Request body for `PUT /api/task_statuses/{id}`. Absent fields are left
/// untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskStatus {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub slug: Patch<String>,
}

impl UpdateTaskStatus {
    /// Validate all present fields before any mutation is applied.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [("name", &self.name), ("slug", &self.slug)] {
            if let Patch::Set(v) = value {
                let len = v.chars().count();
                if len < 1 || len > 100 {
                    return Err(CoreError::Validation(format!(
                        "{field} must be between 1 and 100 characters"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Merge the present fields onto an existing row.
    pub fn merge_into(self, status: &mut TaskStatus) {
        self.name.apply_to(&mut status.name);
        self.slug.apply_to(&mut status.slug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_absent_fields() {
        let mut status = TaskStatus {
            id: 1,
            name: "Draft".into(),
            slug: "draft".into(),
            created_at: chrono::Utc::now(),
        };

        let update: UpdateTaskStatus = serde_json::from_str(r#"{"name": "First draft"}"#).unwrap();
        update.validate().unwrap();
        update.merge_into(&mut status);

        assert_eq!(status.name, "First draft");
        assert_eq!(status.slug, "draft");
    }

    #[test]
    fn out_of_bounds_name_is_rejected() {
        let update = UpdateTaskStatus {
            name: Patch::Set("x".repeat(101)),
            slug: Patch::Unset,
        };
        assert!(update.validate().is_err());

        let update = UpdateTaskStatus {
            name: Patch::Unset,
            slug: Patch::Set(String::new()),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn default_statuses_cover_the_seed_set() {
        let slugs: Vec<&str> = DEFAULT_STATUSES.iter().map(|(_, slug)| *slug).collect();
        assert_eq!(
            slugs,
            ["draft", "to_review", "to_be_fixed", "to_publish", "published"]
        );
    }
}
