use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{NewProject, Project, ProjectPatch};
use crate::database::Repository;
use crate::tenant::{ownership, require_tenant, TenantContext};
use crate::types::ProjectStatus;

use super::error::ServiceError;
use super::validation::{Validator, PROJECT_NAME_MAX};
use super::Outcome;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Absent and `null` fields are both left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CreateProject {
    fn validate(self) -> Result<NewProject, ServiceError> {
        let mut v = Validator::new();
        v.required_text("name", &self.name, PROJECT_NAME_MAX);
        let status = v.status::<ProjectStatus>("status", &self.status);
        let due_date = self.due_date.as_deref().and_then(|d| v.date("due_date", d));
        v.finish()?;

        Ok(NewProject {
            name: self.name,
            description: self.description.unwrap_or_default(),
            status: status.unwrap_or_default(),
            due_date,
        })
    }
}

impl UpdateProject {
    fn validate(self) -> Result<ProjectPatch, ServiceError> {
        let mut v = Validator::new();
        if let Some(name) = &self.name {
            v.required_text("name", name, PROJECT_NAME_MAX);
        }
        let status = self.status.as_deref().and_then(|s| v.status::<ProjectStatus>("status", s));
        let due_date = self.due_date.as_deref().and_then(|d| v.date("due_date", d));
        v.finish()?;

        Ok(ProjectPatch {
            name: self.name,
            description: self.description,
            status,
            due_date,
        })
    }
}

#[derive(Clone)]
pub struct ProjectService {
    repo: Arc<dyn Repository>,
}

impl ProjectService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// The tenant's projects, newest first. No tenant reads as no projects.
    pub async fn list(&self, ctx: &TenantContext) -> Result<Vec<Project>, ServiceError> {
        let Ok(org) = require_tenant(ctx) else {
            return Ok(Vec::new());
        };
        Ok(self.repo.list_projects(org.id).await?)
    }

    pub async fn create(&self, ctx: &TenantContext, input: CreateProject) -> Result<Outcome<Project>, ServiceError> {
        let org = require_tenant(ctx)?;
        let new = input.validate()?;

        let project = self.repo.insert_project(org.id, new).await?;
        info!("Created project {} for organization '{}'", project.id, org.slug);
        Ok(Outcome::ok(project))
    }

    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: i64,
        input: UpdateProject,
    ) -> Result<Outcome<Project>, ServiceError> {
        let org = require_tenant(ctx)?;
        let mut project: Project = ownership::verify(self.repo.as_ref(), org, id).await?;
        let patch = input.validate()?;

        if patch.is_empty() {
            return Ok(Outcome::ok(project));
        }
        patch.apply(&mut project);
        let project = self.repo.update_project(&project).await?;
        Ok(Outcome::ok(project))
    }
}
