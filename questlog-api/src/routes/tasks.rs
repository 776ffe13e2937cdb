/// Task endpoints
///
/// This module provides the two task operations: adding an open task and
/// completing one. Completion is where the gamification happens — a
/// successful completion grants 10 XP and may level the owner up.
///
/// # Endpoints
///
/// - `POST /add` - Create an open task (session required)
/// - `GET /concluir/:task_id` - Complete a task (session required)
///
/// Both redirect to `/index` whatever happens; completion no-ops (unknown
/// task, foreign task, already done) are indistinguishable from success at
/// the HTTP level.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form,
};
use chrono::{Local, NaiveDate};
use questlog_shared::models::task::{CreateTask, Task, TaskCompletion};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::session::SessionUser;

/// Add-task form fields
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    /// Free-text description; empty string is accepted as-is
    pub description: String,

    /// Due date as `YYYY-MM-DD`; absent or blank falls back to today
    pub due_date: Option<String>,
}

/// Parses the submitted due date, falling back to the server-local today
///
/// Blank and unparseable inputs both take the fallback; the form is trusted
/// no further than its syntax.
fn parse_due_date(raw: Option<&str>) -> NaiveDate {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Add-task handler
///
/// Creates an open task owned by the session user.
///
/// # Endpoint
///
/// ```text
/// POST /add
/// Content-Type: application/x-www-form-urlencoded
///
/// description=water+the+plants&due_date=2025-03-14
/// ```
pub async fn add_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Form(form): Form<AddTaskForm>,
) -> ApiResult<Redirect> {
    let due_date = parse_due_date(form.due_date.as_deref());

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: session.user_id,
            description: form.description,
            due_date,
        },
    )
    .await?;

    tracing::debug!(
        task_id = %task.id,
        user_id = %session.user_id,
        due_date = %task.due_date,
        "Task created"
    );

    Ok(Redirect::to("/index"))
}

/// Complete-task handler
///
/// Flips the task to completed and grants the owner 10 XP inside one
/// transaction. Repeat completions, unknown IDs, and tasks owned by someone
/// else all leave the database untouched and answer with the same redirect.
///
/// # Endpoint
///
/// ```text
/// GET /concluir/:task_id
/// ```
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Redirect> {
    match Task::complete(&state.db, task_id, session.user_id).await? {
        TaskCompletion::Completed { progress } => {
            tracing::info!(
                task_id = %task_id,
                user_id = %session.user_id,
                xp = progress.xp,
                level = progress.level,
                "Task completed"
            );
        }
        outcome => {
            tracing::debug!(
                task_id = %task_id,
                user_id = %session.user_id,
                ?outcome,
                "Completion request was a no-op"
            );
        }
    }

    Ok(Redirect::to("/index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_date_accepts_iso_dates() {
        let date = parse_due_date(Some("2025-03-14"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_parse_due_date_trims_whitespace() {
        let date = parse_due_date(Some("  2025-03-14  "));
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_parse_due_date_defaults_to_today_when_absent() {
        assert_eq!(parse_due_date(None), Local::now().date_naive());
    }

    #[test]
    fn test_parse_due_date_defaults_to_today_when_blank() {
        assert_eq!(parse_due_date(Some("")), Local::now().date_naive());
        assert_eq!(parse_due_date(Some("   ")), Local::now().date_naive());
    }

    #[test]
    fn test_parse_due_date_defaults_to_today_when_malformed() {
        assert_eq!(parse_due_date(Some("14/03/2025")), Local::now().date_naive());
        assert_eq!(parse_due_date(Some("soon")), Local::now().date_naive());
    }

    #[test]
    fn test_add_task_form_due_date_is_optional() {
        let form: AddTaskForm =
            serde_json::from_str(r#"{"description":"water the plants"}"#).unwrap();

        assert_eq!(form.description, "water the plants");
        assert!(form.due_date.is_none());
    }
}
