//! Domain error taxonomy.
//!
//! Every fallible operation in the db and api crates ultimately surfaces one
//! of these variants. The api crate maps them onto HTTP status codes in its
//! `AppError` wrapper.

use crate::types::DbId;

/// Domain-level error for the task-tracking backend.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity addressed by the request does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A referenced foreign entity (status slug, assignee id, label id) does
    /// not exist. Distinct from [`CoreError::NotFound`] so a bad reference in
    /// a payload is never reported as "task not found".
    #[error("{entity} reference '{reference}' not found")]
    ReferenceNotFound {
        entity: &'static str,
        reference: String,
    },

    /// Malformed or out-of-bounds input, rejected before any persistence.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness or referential-integrity conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials/token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure. The message is logged, never sent to
    /// clients verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::ReferenceNotFound`] with a displayable
    /// reference value.
    pub fn reference_not_found(entity: &'static str, reference: impl ToString) -> Self {
        Self::ReferenceNotFound {
            entity,
            reference: reference.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Task",
            id: 42,
        };
        assert_eq!(err.to_string(), "Task with id 42 not found");
    }

    #[test]
    fn reference_not_found_carries_the_reference() {
        let err = CoreError::reference_not_found("TaskStatus", "to_review");
        assert_eq!(
            err.to_string(),
            "TaskStatus reference 'to_review' not found"
        );

        let err = CoreError::reference_not_found("User", 7);
        assert_eq!(err.to_string(), "User reference '7' not found");
    }
}
