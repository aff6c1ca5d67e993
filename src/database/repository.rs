use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewComment, NewOrganization, NewProject, NewTask, Organization, Project, Task, TaskComment,
};

/// Storage seam shared by the Postgres and in-process stores.
///
/// Lookups by id are unscoped: tenant ownership is checked by
/// `tenant::ownership`, never inferred from a successful fetch. List methods
/// take the already-verified parent id and return rows newest-first, except
/// organizations which come back ordered by name.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError>;
    async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<Organization>, DatabaseError>;
    /// Fails with `UniqueViolation` when the slug is taken
    async fn insert_organization(&self, new: NewOrganization) -> Result<Organization, DatabaseError>;

    async fn list_projects(&self, organization_id: i64) -> Result<Vec<Project>, DatabaseError>;
    async fn find_project(&self, id: i64) -> Result<Option<Project>, DatabaseError>;
    async fn insert_project(&self, organization_id: i64, new: NewProject) -> Result<Project, DatabaseError>;
    /// Writes every mutable column of `project` (last write wins)
    async fn update_project(&self, project: &Project) -> Result<Project, DatabaseError>;

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, DatabaseError>;
    async fn find_task(&self, id: i64) -> Result<Option<Task>, DatabaseError>;
    async fn insert_task(&self, project_id: i64, new: NewTask) -> Result<Task, DatabaseError>;
    /// Writes every mutable column of `task` (last write wins)
    async fn update_task(&self, task: &Task) -> Result<Task, DatabaseError>;

    async fn list_comments(&self, task_id: i64) -> Result<Vec<TaskComment>, DatabaseError>;
    async fn insert_comment(&self, task_id: i64, new: NewComment) -> Result<TaskComment, DatabaseError>;
}
