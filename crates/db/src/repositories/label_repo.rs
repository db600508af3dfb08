//! Repository for the `labels` table.

use sqlx::PgExecutor;
use taskhub_core::types::DbId;

use crate::models::label::Label;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for labels.
pub struct LabelRepo;

impl LabelRepo {
    /// Insert a new label, returning the created row.
    pub async fn create(exec: impl PgExecutor<'_>, name: &str) -> Result<Label, sqlx::Error> {
        let query = format!("INSERT INTO labels (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Label>(&query)
            .bind(name)
            .fetch_one(exec)
            .await
    }

    /// Find a label by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels WHERE id = $1");
        sqlx::query_as::<_, Label>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Fetch the labels matching the given ids. Missing ids are simply not
    /// in the result; the caller decides whether that is an error.
    pub async fn find_by_ids(
        exec: impl PgExecutor<'_>,
        ids: &[DbId],
    ) -> Result<Vec<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Label>(&query)
            .bind(ids)
            .fetch_all(exec)
            .await
    }

    /// List all labels ordered by id.
    pub async fn list_all(exec: impl PgExecutor<'_>) -> Result<Vec<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels ORDER BY id");
        sqlx::query_as::<_, Label>(&query).fetch_all(exec).await
    }

    /// Persist a merged label row, returning the stored state.
    pub async fn save(exec: impl PgExecutor<'_>, label: &Label) -> Result<Label, sqlx::Error> {
        let query = format!("UPDATE labels SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Label>(&query)
            .bind(label.id)
            .bind(&label.name)
            .fetch_one(exec)
            .await
    }

    /// Delete a label by ID. Returns `true` if a row was removed.
    pub async fn delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether any task carries this label. Used to reject deletion
    /// with a conflict instead of an obscure FK failure.
    pub async fn is_attached_to_tasks(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM task_labels WHERE label_id = $1)")
                .bind(id)
                .fetch_one(exec)
                .await?;
        Ok(exists)
    }
}
