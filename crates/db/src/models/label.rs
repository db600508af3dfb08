//! Label entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::error::CoreError;
use taskhub_core::patch::Patch;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// Full label row from the `labels` table.
#[derive(Debug, Clone, FromRow)]
pub struct Label {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Label representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

impl From<Label> for LabelResponse {
    fn from(label: Label) -> Self {
        Self {
            id: label.id,
            name: label.name,
            created_at: label.created_at,
        }
    }
}

/// Request body for `POST /api/labels`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLabel {
    #[validate(length(min = 3, max = 1000, message = "name must be between 3 and 1000 characters"))]
    pub name: String,
}

/// Request body for `PUT /api/labels/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLabel {
    #[serde(default)]
    pub name: Patch<String>,
}

impl UpdateLabel {
    /// Validate all present fields before any mutation is applied.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Patch::Set(name) = &self.name {
            let len = name.chars().count();
            if len < 3 || len > 1000 {
                return Err(CoreError::Validation(
                    "name must be between 3 and 1000 characters".into(),
                ));
            }
        }
        Ok(())
    }

    /// Merge the present fields onto an existing row.
    pub fn merge_into(self, label: &mut Label) {
        self.name.apply_to(&mut label.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_is_rejected() {
        let update = UpdateLabel {
            name: Patch::Set("ab".into()),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn absent_name_passes_validation_and_merge_is_a_noop() {
        let mut label = Label {
            id: 1,
            name: "bug".into(),
            created_at: chrono::Utc::now(),
        };

        let update: UpdateLabel = serde_json::from_str("{}").unwrap();
        update.validate().unwrap();
        update.merge_into(&mut label);

        assert_eq!(label.name, "bug");
    }
}
