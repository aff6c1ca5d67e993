use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::comment::TaskComment;
use crate::types::TaskStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    /// Empty when unassigned
    pub assignee_email: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Newest first; filled in by the task service, not the row
    #[sqlx(skip)]
    pub comments: Vec<TaskComment>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assignee_email: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee_email: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assignee_email) = &self.assignee_email {
            task.assignee_email = assignee_email.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
    }
}
