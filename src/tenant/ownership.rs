//! Ownership-chain verification.
//!
//! Every entity below an organization reaches its tenant by walking parent
//! references: Project -> Organization, Task -> Project -> Organization. The
//! walk happens here, in one place, for every id a caller supplies. An id that
//! exists but belongs to another tenant fails exactly like an id that does not
//! exist.

use async_trait::async_trait;

use crate::database::models::{Organization, Project, Task};
use crate::database::{DatabaseError, Repository};
use crate::services::ServiceError;

/// An entity that belongs to exactly one tenant through its parents
#[async_trait]
pub trait Owned: Sized + Send {
    /// Name used in the not-found error
    const KIND: &'static str;

    async fn load(repo: &dyn Repository, id: i64) -> Result<Option<Self>, DatabaseError>;

    /// Organization id at the top of the chain; `None` if a link is broken
    async fn owner_id(&self, repo: &dyn Repository) -> Result<Option<i64>, DatabaseError>;
}

#[async_trait]
impl Owned for Project {
    const KIND: &'static str = "Project";

    async fn load(repo: &dyn Repository, id: i64) -> Result<Option<Self>, DatabaseError> {
        repo.find_project(id).await
    }

    async fn owner_id(&self, _repo: &dyn Repository) -> Result<Option<i64>, DatabaseError> {
        Ok(Some(self.organization_id))
    }
}

#[async_trait]
impl Owned for Task {
    const KIND: &'static str = "Task";

    async fn load(repo: &dyn Repository, id: i64) -> Result<Option<Self>, DatabaseError> {
        repo.find_task(id).await
    }

    async fn owner_id(&self, repo: &dyn Repository) -> Result<Option<i64>, DatabaseError> {
        match Project::load(repo, self.project_id).await? {
            Some(project) => project.owner_id(repo).await,
            None => Ok(None),
        }
    }
}

/// Load `id` and confirm its chain ends at `tenant`. `Ok(None)` covers both
/// "no such id" and "owned by someone else".
pub async fn find_owned<T: Owned>(
    repo: &dyn Repository,
    tenant: &Organization,
    id: i64,
) -> Result<Option<T>, DatabaseError> {
    let Some(entity) = T::load(repo, id).await? else {
        return Ok(None);
    };

    match entity.owner_id(repo).await? {
        Some(owner) if owner == tenant.id => Ok(Some(entity)),
        _ => {
            tracing::debug!(
                "{} {} is outside organization '{}'; reporting not found",
                T::KIND,
                id,
                tenant.slug
            );
            Ok(None)
        }
    }
}

/// Like [`find_owned`] but a miss is `ServiceError::NotFound`. Used before every write.
pub async fn verify<T: Owned>(
    repo: &dyn Repository,
    tenant: &Organization,
    id: i64,
) -> Result<T, ServiceError> {
    find_owned(repo, tenant, id)
        .await?
        .ok_or(ServiceError::NotFound(T::KIND))
}
