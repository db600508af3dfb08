//! Repository for the `users` table.

use sqlx::PgExecutor;
use taskhub_core::types::DbId;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, first_name, last_name, password_hash, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// `password_hash` must already be an Argon2 PHC string; this layer never
    /// sees plaintext passwords.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, first_name, last_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(first_name)
            .bind(last_name)
            .bind(password_hash)
            .fetch_one(exec)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Find a user by email (used by login).
    pub async fn find_by_email(
        exec: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(exec)
            .await
    }

    /// List all users ordered by id.
    pub async fn list_all(exec: impl PgExecutor<'_>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(exec).await
    }

    /// Persist a merged user row, returning the stored state.
    pub async fn save(exec: impl PgExecutor<'_>, user: &User) -> Result<User, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                password_hash = $5,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .fetch_one(exec)
            .await
    }

    /// Delete a user by ID. Returns `true` if a row was removed.
    pub async fn delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether any task references this user as assignee. Used to
    /// reject deletion with a conflict instead of an obscure FK failure.
    pub async fn is_assigned_to_tasks(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM tasks WHERE assignee_id = $1)")
                .bind(id)
                .fetch_one(exec)
                .await?;
        Ok(exists)
    }
}
