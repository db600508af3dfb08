//! Repository for the `tasks` table and its `task_labels` join table.
//!
//! Listing supports a sparse filter composed into a single conjunction of
//! predicates; callers with an empty filter should use [`TaskRepo::list_all`]
//! so no filter machinery runs at all.

use sqlx::{PgConnection, PgExecutor};
use taskhub_core::types::DbId;

use crate::models::task::{Task, TaskFilter};

/// Column list for task queries. The status slug is always joined in so the
/// wire projection never needs a second lookup.
const COLUMNS: &str = r#"t.id, t.name, t."index", t.description, t.status_id,
    s.slug AS status_slug, t.assignee_id, t.created_at"#;

/// Shared FROM clause joining the status table.
const FROM: &str = "FROM tasks t JOIN task_statuses s ON s.id = t.status_id";

/// Provides CRUD operations for tasks and their label associations.
pub struct TaskRepo;

impl TaskRepo {
    /// Find a task by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE t.id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// List all tasks, unfiltered, in id order.
    pub async fn list_all(exec: impl PgExecutor<'_>) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} ORDER BY t.id");
        sqlx::query_as::<_, Task>(&query).fetch_all(exec).await
    }

    /// List tasks matching the given filter.
    ///
    /// Builds a single WHERE clause that is the logical AND of exactly the
    /// criteria present in `filter`; absent criteria contribute nothing.
    /// Composition is order-independent. Callers should check
    /// [`TaskFilter::is_empty`] first and take [`TaskRepo::list_all`] instead
    /// for the no-filter case.
    pub async fn list_filtered(
        exec: impl PgExecutor<'_>,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        // Build the WHERE clause; each criterion contributes exactly one
        // condition and one bind, so the parameter index is conditions.len()+1.
        let mut conditions: Vec<String> = Vec::new();

        if filter.title_cont.is_some() {
            // Case-insensitive substring match; the wildcards wrap the bound
            // value so the pattern itself is never interpolated into SQL.
            conditions.push(format!(
                "t.name ILIKE '%' || ${} || '%'",
                conditions.len() + 1
            ));
        }
        if filter.assignee_id.is_some() {
            conditions.push(format!("t.assignee_id = ${}", conditions.len() + 1));
        }
        if filter.status.is_some() {
            conditions.push(format!("s.slug = ${}", conditions.len() + 1));
        }
        if filter.label_id.is_some() {
            // Membership over the many-to-many relation, not equality.
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM task_labels tl \
                 WHERE tl.task_id = t.id AND tl.label_id = ${})",
                conditions.len() + 1
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} {FROM} {where_clause} ORDER BY t.id");

        let mut q = sqlx::query_as::<_, Task>(&query);

        if let Some(title_cont) = &filter.title_cont {
            q = q.bind(title_cont);
        }
        if let Some(assignee_id) = filter.assignee_id {
            q = q.bind(assignee_id);
        }
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(label_id) = filter.label_id {
            q = q.bind(label_id);
        }

        q.fetch_all(exec).await
    }

    /// Insert a new task, returning the created row (with its joined slug).
    ///
    /// Runs two statements, so it takes an open connection -- callers wrap it
    /// in the transaction that also resolves references and writes labels.
    pub async fn insert(
        conn: &mut PgConnection,
        name: &str,
        index: Option<i32>,
        description: Option<&str>,
        status_id: DbId,
        assignee_id: Option<DbId>,
    ) -> Result<Task, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            r#"INSERT INTO tasks (name, "index", description, status_id, assignee_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(name)
        .bind(index)
        .bind(description)
        .bind(status_id)
        .bind(assignee_id)
        .fetch_one(&mut *conn)
        .await?;

        Self::find_by_id(&mut *conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Persist a merged task row, returning the stored state.
    pub async fn save(conn: &mut PgConnection, task: &Task) -> Result<Task, sqlx::Error> {
        sqlx::query(
            r#"UPDATE tasks SET
                name = $2,
                "index" = $3,
                description = $4,
                status_id = $5,
                assignee_id = $6
             WHERE id = $1"#,
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(task.index)
        .bind(&task.description)
        .bind(task.status_id)
        .bind(task.assignee_id)
        .execute(&mut *conn)
        .await?;

        Self::find_by_id(&mut *conn, task.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Delete a task by ID. Label associations go with it (ON DELETE CASCADE).
    pub async fn delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the full label set of a task. An empty slice removes all
    /// associations.
    pub async fn set_labels(
        conn: &mut PgConnection,
        task_id: DbId,
        label_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM task_labels WHERE task_id = $1")
            .bind(task_id)
            .execute(&mut *conn)
            .await?;

        if !label_ids.is_empty() {
            sqlx::query(
                "INSERT INTO task_labels (task_id, label_id)
                 SELECT $1, unnest($2::BIGINT[])",
            )
            .bind(task_id)
            .bind(label_ids)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Label ids attached to a single task, in id order.
    pub async fn label_ids_for_task(
        exec: impl PgExecutor<'_>,
        task_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT label_id FROM task_labels WHERE task_id = $1 ORDER BY label_id",
        )
        .bind(task_id)
        .fetch_all(exec)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// `(task_id, label_id)` pairs for a set of tasks, for bulk projection.
    pub async fn label_ids_for_tasks(
        exec: impl PgExecutor<'_>,
        task_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT task_id, label_id FROM task_labels
             WHERE task_id = ANY($1)
             ORDER BY task_id, label_id",
        )
        .bind(task_ids)
        .fetch_all(exec)
        .await
    }
}
