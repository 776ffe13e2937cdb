/// Task model and database operations
///
/// This module provides the Task model representing personal to-do items.
/// Completing a task is the only XP source in the system: the completion
/// runs in a single transaction that flips the task flag and applies the
/// leveling rule to the owner's row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     description TEXT NOT NULL,
///     due_date DATE NOT NULL DEFAULT CURRENT_DATE,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use questlog_shared::models::task::{Task, CreateTask, TaskCompletion};
/// use questlog_shared::db::pool::{create_pool, DatabaseConfig};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id,
///     description: "Water the plants".to_string(),
///     due_date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
/// }).await?;
///
/// // Complete it: +10 XP for the owner
/// match Task::complete(&pool, task.id, user_id).await? {
///     TaskCompletion::Completed { progress } => {
///         println!("Now at {} XP, level {}", progress.xp, progress.level);
///     }
///     other => println!("No-op: {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::leveling::{Progress, XP_PER_TASK};

/// Task model representing a personal to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owner of the task
    pub user_id: Uuid,

    /// Free-text description (empty string permitted)
    pub description: String,

    /// Day the task is due
    pub due_date: NaiveDate,

    /// Whether the task has been completed
    ///
    /// One-way flag: there is no un-complete operation
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owner of the task
    pub user_id: Uuid,

    /// Free-text description
    pub description: String,

    /// Day the task is due
    pub due_date: NaiveDate,
}

/// Outcome of a completion attempt
///
/// Every variant except `Completed` leaves the database untouched. The
/// variants exist so callers and tests can tell the no-op causes apart,
/// even though the HTTP layer answers them all identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCompletion {
    /// Task was open and owned by the caller; flag flipped, XP granted
    Completed {
        /// The owner's progress after the grant
        progress: Progress,
    },

    /// Task was already completed; no XP granted
    AlreadyCompleted,

    /// No task with that ID exists
    NotFound,

    /// Task belongs to a different user
    NotOwner,
}

impl Task {
    /// Creates a new open task
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Task creation data
    ///
    /// # Returns
    ///
    /// The newly created task with `completed = false`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner does not exist (foreign key violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, description, due_date)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, description, due_date, completed, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.description)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, description, due_date, completed, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks belonging to a user, oldest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, description, due_date, completed, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Completes a task on behalf of `user_id` and grants XP to the owner
    ///
    /// The whole operation runs in one transaction:
    /// 1. the task row is flipped with `WHERE completed = FALSE`, so a
    ///    concurrent caller loses the race and grants nothing
    /// 2. the owner's row is locked, the leveling rule applied with a
    ///    +10 XP delta, and the new totals written back
    ///
    /// A missing task, a task owned by someone else, or a task that is
    /// already completed are all reported as no-op outcomes without
    /// touching the database.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - Task to complete
    /// * `user_id` - The user attempting the completion
    ///
    /// # Returns
    ///
    /// A [`TaskCompletion`] describing what happened
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails
    pub async fn complete(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<TaskCompletion, sqlx::Error> {
        let task = match Task::find_by_id(pool, id).await? {
            Some(task) => task,
            None => return Ok(TaskCompletion::NotFound),
        };

        if task.user_id != user_id {
            return Ok(TaskCompletion::NotOwner);
        }

        if task.completed {
            return Ok(TaskCompletion::AlreadyCompleted);
        }

        let mut tx = pool.begin().await?;

        // The completed guard closes the race between the check above and
        // this update: only the caller that flips the flag grants XP
        let flipped = sqlx::query(
            r#"
            UPDATE tasks
            SET completed = TRUE
            WHERE id = $1 AND completed = FALSE
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(TaskCompletion::AlreadyCompleted);
        }

        let (xp, level): (i32, i32) =
            sqlx::query_as("SELECT xp, level FROM users WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        let progress = Progress { xp, level }.grant(XP_PER_TASK);

        sqlx::query(
            r#"
            UPDATE users
            SET xp = $2,
                level = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(progress.xp)
        .bind(progress.level)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TaskCompletion::Completed { progress })
    }
}
