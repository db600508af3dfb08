//! Repository for the `task_statuses` table.

use sqlx::PgExecutor;
use taskhub_core::types::DbId;

use crate::models::status::{TaskStatus, DEFAULT_STATUSES};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, created_at";

/// Provides CRUD operations for task statuses.
pub struct StatusRepo;

impl StatusRepo {
    /// Insert a new status, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        name: &str,
        slug: &str,
    ) -> Result<TaskStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_statuses (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(exec)
            .await
    }

    /// Find a status by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<TaskStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_statuses WHERE id = $1");
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Find a status by its slug -- the wire-level status identifier.
    pub async fn find_by_slug(
        exec: impl PgExecutor<'_>,
        slug: &str,
    ) -> Result<Option<TaskStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_statuses WHERE slug = $1");
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(slug)
            .fetch_optional(exec)
            .await
    }

    /// List all statuses ordered by id.
    pub async fn list_all(exec: impl PgExecutor<'_>) -> Result<Vec<TaskStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_statuses ORDER BY id");
        sqlx::query_as::<_, TaskStatus>(&query)
            .fetch_all(exec)
            .await
    }

    /// Persist a merged status row, returning the stored state.
    pub async fn save(
        exec: impl PgExecutor<'_>,
        status: &TaskStatus,
    ) -> Result<TaskStatus, sqlx::Error> {
        let query = format!(
            "UPDATE task_statuses SET name = $2, slug = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskStatus>(&query)
            .bind(status.id)
            .bind(&status.name)
            .bind(&status.slug)
            .fetch_one(exec)
            .await
    }

    /// Delete a status by ID. Returns `true` if a row was removed.
    pub async fn delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_statuses WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether any task references this status. Used to reject deletion
    /// with a conflict instead of an obscure FK failure.
    pub async fn is_used_by_tasks(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM tasks WHERE status_id = $1)")
                .bind(id)
                .fetch_one(exec)
                .await?;
        Ok(exists)
    }

    /// Seed the default status set when the table is empty. Idempotent:
    /// repeated startups leave an already-populated table alone.
    pub async fn seed_defaults(pool: &sqlx::PgPool) -> Result<u64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM task_statuses")
            .fetch_one(pool)
            .await?;
        if count > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for (name, slug) in DEFAULT_STATUSES {
            let result =
                sqlx::query("INSERT INTO task_statuses (name, slug) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                    .bind(name)
                    .bind(slug)
                    .execute(pool)
                    .await?;
            inserted += result.rows_affected();
        }
        tracing::debug!(inserted, "Inserted default task statuses");
        Ok(inserted)
    }
}
