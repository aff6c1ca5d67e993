use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TaskComment {
    pub id: i64,
    #[serde(skip_serializing)]
    pub task_id: i64,
    pub content: String,
    pub author_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub author_email: String,
}
