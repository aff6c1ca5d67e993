use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{NewTask, Project, Task, TaskPatch};
use crate::database::Repository;
use crate::tenant::{ownership, require_tenant, TenantContext};
use crate::types::TaskStatus;

use super::error::ServiceError;
use super::validation::{Validator, TASK_TITLE_MAX};
use super::Outcome;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee_email: Option<String>,
    /// RFC 3339
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Absent and `null` fields are both left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee_email: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CreateTask {
    fn validate(self) -> Result<NewTask, ServiceError> {
        let assignee_email = self.assignee_email.unwrap_or_default();

        let mut v = Validator::new();
        v.required_text("title", &self.title, TASK_TITLE_MAX);
        let status = v.status::<TaskStatus>("status", &self.status);
        v.optional_email("assignee_email", &assignee_email);
        let due_date = self.due_date.as_deref().and_then(|d| v.timestamp("due_date", d));
        v.finish()?;

        Ok(NewTask {
            title: self.title,
            description: self.description.unwrap_or_default(),
            status: status.unwrap_or_default(),
            assignee_email,
            due_date,
        })
    }
}

impl UpdateTask {
    fn validate(self) -> Result<TaskPatch, ServiceError> {
        let mut v = Validator::new();
        if let Some(title) = &self.title {
            v.required_text("title", title, TASK_TITLE_MAX);
        }
        let status = self.status.as_deref().and_then(|s| v.status::<TaskStatus>("status", s));
        if let Some(email) = &self.assignee_email {
            v.optional_email("assignee_email", email);
        }
        let due_date = self.due_date.as_deref().and_then(|d| v.timestamp("due_date", d));
        v.finish()?;

        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status,
            assignee_email: self.assignee_email,
            due_date,
        })
    }
}

#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn Repository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Tasks of a project the tenant owns, newest first, each with its comments.
    /// No tenant, or a project outside the tenant, reads as an empty list.
    pub async fn list(&self, ctx: &TenantContext, project_id: i64) -> Result<Vec<Task>, ServiceError> {
        let Ok(org) = require_tenant(ctx) else {
            return Ok(Vec::new());
        };
        let repo = self.repo.as_ref();
        let Some(project) = ownership::find_owned::<Project>(repo, org, project_id).await? else {
            return Ok(Vec::new());
        };

        let mut tasks = repo.list_tasks(project.id).await?;
        for task in &mut tasks {
            task.comments = repo.list_comments(task.id).await?;
        }
        Ok(tasks)
    }

    pub async fn create(
        &self,
        ctx: &TenantContext,
        project_id: i64,
        input: CreateTask,
    ) -> Result<Outcome<Task>, ServiceError> {
        let org = require_tenant(ctx)?;
        let project: Project = ownership::verify(self.repo.as_ref(), org, project_id).await?;
        let new = input.validate()?;

        let task = self.repo.insert_task(project.id, new).await?;
        info!("Created task {} in project {} ('{}')", task.id, project.id, org.slug);
        Ok(Outcome::ok(task))
    }

    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: i64,
        input: UpdateTask,
    ) -> Result<Outcome<Task>, ServiceError> {
        let org = require_tenant(ctx)?;
        let repo = self.repo.as_ref();
        let mut task: Task = ownership::verify(repo, org, id).await?;
        let patch = input.validate()?;

        if !patch.is_empty() {
            patch.apply(&mut task);
            task = repo.update_task(&task).await?;
        }
        task.comments = repo.list_comments(task.id).await?;
        Ok(Outcome::ok(task))
    }
}
