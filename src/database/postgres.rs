use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewComment, NewOrganization, NewProject, NewTask, Organization, Project, Task, TaskComment,
};
use crate::database::repository::Repository;

const ORGANIZATION_COLUMNS: &str = "id, name, slug, contact_email, created_at";

const PROJECT_SELECT: &str = r#"
    SELECT
        p.id, p.organization_id, p.name, p.description, p.status, p.due_date, p.created_at,
        (SELECT COUNT(*) FROM tasks t WHERE t.project_id = p.id) AS task_count,
        (SELECT COUNT(*) FROM tasks t WHERE t.project_id = p.id AND t.status = 'DONE') AS completed_tasks
    FROM projects p
"#;

const TASK_COLUMNS: &str =
    "id, project_id, title, description, status, assignee_email, due_date, created_at";

const COMMENT_COLUMNS: &str = "id, task_id, content, author_email, created_at";

/// Postgres-backed store
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError> {
        let sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations ORDER BY name ASC, id ASC");
        let rows = sqlx::query_as::<_, Organization>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_organization_by_slug(&self, slug: &str) -> Result<Option<Organization>, DatabaseError> {
        let sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE slug = $1");
        let row = sqlx::query_as::<_, Organization>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_organization(&self, new: NewOrganization) -> Result<Organization, DatabaseError> {
        let sql = format!(
            "INSERT INTO organizations (name, slug, contact_email) VALUES ($1, $2, $3) RETURNING {ORGANIZATION_COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&sql)
            .bind(&new.name)
            .bind(&new.slug)
            .bind(&new.contact_email)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)
    }

    async fn list_projects(&self, organization_id: i64) -> Result<Vec<Project>, DatabaseError> {
        let sql = format!("{PROJECT_SELECT} WHERE p.organization_id = $1 ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, Project>(&sql)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, DatabaseError> {
        let sql = format!("{PROJECT_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_project(&self, organization_id: i64, new: NewProject) -> Result<Project, DatabaseError> {
        // A fresh project has no tasks; the counters fall back to their defaults
        let row = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (organization_id, name, description, status, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, name, description, status, due_date, created_at
            "#,
        )
        .bind(organization_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.status.as_str())
        .bind(new.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        Ok(row)
    }

    async fn update_project(&self, project: &Project) -> Result<Project, DatabaseError> {
        sqlx::query(
            "UPDATE projects SET name = $2, description = $3, status = $4, due_date = $5 WHERE id = $1",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.status.as_str())
        .bind(project.due_date)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;

        self.find_project(project.id)
            .await?
            .ok_or(DatabaseError::RowVanished("project update"))
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, DatabaseError> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, Task>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let row = sqlx::query_as::<_, Task>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn insert_task(&self, project_id: i64, new: NewTask) -> Result<Task, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO tasks (project_id, title, description, status, assignee_email, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TASK_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(project_id)
            .bind(&new.title)
            .bind(&new.description)
            .bind(new.status.as_str())
            .bind(&new.assignee_email)
            .bind(new.due_date)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, assignee_email = $5, due_date = $6
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status.as_str())
            .bind(&task.assignee_email)
            .bind(task.due_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?
            .ok_or(DatabaseError::RowVanished("task update"))
    }

    async fn list_comments(&self, task_id: i64) -> Result<Vec<TaskComment>, DatabaseError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM task_comments WHERE task_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, TaskComment>(&sql)
            .bind(task_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_comment(&self, task_id: i64, new: NewComment) -> Result<TaskComment, DatabaseError> {
        let sql = format!(
            "INSERT INTO task_comments (task_id, content, author_email) VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&sql)
            .bind(task_id)
            .bind(&new.content)
            .bind(&new.author_email)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)
    }
}
