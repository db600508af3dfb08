//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::error::CoreError;
use taskhub_core::patch::Patch;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// Minimum accepted password length (characters).
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

/// Request body for `POST /api/users` (registration).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(length(min = 3, message = "password must be at least 3 characters"))]
    pub password: String,
}

/// Request body for `PUT /api/users/{id}`.
///
/// Every field is a [`Patch`]: absent fields leave the stored value alone.
/// `first_name`/`last_name` are nullable, so an explicit `null` clears them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub first_name: Patch<Option<String>>,
    #[serde(default)]
    pub last_name: Patch<Option<String>>,
    #[serde(default)]
    pub password: Patch<String>,
}

impl UpdateUser {
    /// Validate all present fields before any mutation is applied.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Patch::Set(email) = &self.email {
            if !email.contains('@') || email.trim().is_empty() {
                return Err(CoreError::Validation(
                    "email must be a valid address".into(),
                ));
            }
        }
        if let Patch::Set(password) = &self.password {
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                return Err(CoreError::Validation(format!(
                    "password must be at least {MIN_PASSWORD_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }

    /// Merge the present scalar fields onto an existing row.
    ///
    /// The password is handled separately by the caller: it must be hashed
    /// before it touches the row.
    pub fn merge_into(self, user: &mut User) {
        self.email.apply_to(&mut user.email);
        self.first_name.apply_to(&mut user.first_name);
        self.last_name.apply_to(&mut user.last_name);
    }
}
