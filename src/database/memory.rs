use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewComment, NewOrganization, NewProject, NewTask, Organization, Project, Task, TaskComment,
};
use crate::database::repository::Repository;
use crate::types::TaskStatus;

#[derive(Default)]
struct Tables {
    next_id: i64,
    organizations: Vec<Organization>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    comments: Vec<TaskComment>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Fill in the computed counters the way the Postgres select does
    fn with_counts(&self, mut project: Project) -> Project {
        let tasks = self.tasks.iter().filter(|t| t.project_id == project.id);
        let (total, done) = tasks.fold((0, 0), |(total, done), t| {
            (total + 1, done + i64::from(t.status == TaskStatus::Done))
        });
        project.task_count = total;
        project.completed_tasks = done;
        project
    }
}

/// In-process store for development and tests. One lock serializes writers,
/// which gives the same last-write-wins outcome as row locking.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows = tables.organizations.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<Organization>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.organizations.iter().find(|o| o.slug == slug).cloned())
    }

    async fn insert_organization(&self, new: NewOrganization) -> Result<Organization, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.organizations.iter().any(|o| o.slug == new.slug) {
            return Err(DatabaseError::UniqueViolation("organizations_slug_key".to_string()));
        }
        let organization = Organization {
            id: tables.next_id(),
            name: new.name,
            slug: new.slug,
            contact_email: new.contact_email,
            created_at: Utc::now(),
        };
        tables.organizations.push(organization.clone());
        Ok(organization)
    }

    async fn list_projects(&self, organization_id: i64) -> Result<Vec<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| p.organization_id == organization_id)
            .map(|p| tables.with_counts(p.clone()))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.with_counts(p.clone())))
    }

    async fn insert_project(&self, organization_id: i64, new: NewProject) -> Result<Project, DatabaseError> {
        let mut tables = self.tables.write().await;
        let project = Project {
            id: tables.next_id(),
            organization_id,
            name: new.name,
            description: new.description,
            status: new.status,
            due_date: new.due_date,
            created_at: Utc::now(),
            task_count: 0,
            completed_tasks: 0,
        };
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, project: &Project) -> Result<Project, DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or(DatabaseError::RowVanished("project update"))?;
        stored.name = project.name.clone();
        stored.description = project.description.clone();
        stored.status = project.status;
        stored.due_date = project.due_date;
        let updated = stored.clone();
        Ok(tables.with_counts(updated))
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_task(&self, project_id: i64, new: NewTask) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key on tasks.project_id
        if !tables.projects.iter().any(|p| p.id == project_id) {
            return Err(DatabaseError::RowVanished("task insert"));
        }
        let task = Task {
            id: tables.next_id(),
            project_id,
            title: new.title,
            description: new.description,
            status: new.status,
            assignee_email: new.assignee_email,
            due_date: new.due_date,
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(DatabaseError::RowVanished("task update"))?;
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.status = task.status;
        stored.assignee_email = task.assignee_email.clone();
        stored.due_date = task.due_date;
        Ok(stored.clone())
    }

    async fn list_comments(&self, task_id: i64) -> Result<Vec<TaskComment>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<TaskComment> = tables
            .comments
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert_comment(&self, task_id: i64, new: NewComment) -> Result<TaskComment, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.tasks.iter().any(|t| t.id == task_id) {
            return Err(DatabaseError::RowVanished("comment insert"));
        }
        let comment = TaskComment {
            id: tables.next_id(),
            task_id,
            content: new.content,
            author_email: new.author_email,
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }
}
