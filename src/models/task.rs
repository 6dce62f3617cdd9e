use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

use crate::error::AppError;

/// Status a task starts with when the client does not supply one.
const DEFAULT_STATUS: &str = "todo";

/// Input structure for creating or updating a task.
///
/// `status` is a free-form string rather than an enforced enum; `due_date` is
/// an opaque string-encoded date whose format is not validated.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The status of the task. Defaults to "todo" when unset.
    pub status: Option<String>,

    /// Optional due date, stored as given.
    pub due_date: Option<String>,
}

impl TaskInput {
    fn status_or_default(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string())
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_date: Option<String>,
    /// Identifier of the user who owns the task.
    pub user_id: i64,
}

/// Owner-scoped task persistence.
///
/// Every query and mutation is filtered by the owning user id; a task is
/// never visible or mutable outside operations scoped to its owner. Each
/// operation is a single atomic statement.
#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns all tasks owned by `user_id`, in store-native order.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, due_date, user_id
             FROM tasks WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Inserts a task owned by `user_id` and returns it with its new id.
    /// The owner always comes from the authenticated caller, never the body.
    pub async fn create(&self, input: TaskInput, user_id: i64) -> Result<Task, AppError> {
        let status = input.status_or_default();

        let result = sqlx::query(
            "INSERT INTO tasks (title, description, status, due_date, user_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&status)
        .bind(&input.due_date)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Task {
            id: result.last_insert_rowid(),
            title: input.title,
            description: input.description,
            status,
            due_date: input.due_date,
            user_id,
        })
    }

    /// Updates the mutable fields of the task matching `(id, user_id)`.
    ///
    /// Zero rows affected means the task does not exist or belongs to someone
    /// else; both answer `Forbidden` so callers cannot probe for foreign task
    /// ids.
    pub async fn update(&self, id: i64, input: TaskInput, user_id: i64) -> Result<Task, AppError> {
        let status = input.status_or_default();

        let result = sqlx::query(
            "UPDATE tasks
             SET title = ?, description = ?, status = ?, due_date = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&status)
        .bind(&input.due_date)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Forbidden("No task found or unauthorized".into()));
        }

        Ok(Task {
            id,
            title: input.title,
            description: input.description,
            status,
            due_date: input.due_date,
            user_id,
        })
    }

    /// Deletes the task matching `(id, user_id)`. Same `Forbidden` semantics
    /// as `update` when nothing matches.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Forbidden("No task found or unauthorized".into()));
        }

        Ok(())
    }
}
