use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{NewComment, Task, TaskComment};
use crate::database::Repository;
use crate::tenant::{ownership, require_tenant, TenantContext};

use super::error::ServiceError;
use super::validation::Validator;
use super::Outcome;

#[derive(Debug, Clone, Deserialize)]
pub struct AddComment {
    pub content: String,
    pub author_email: String,
}

#[derive(Clone)]
pub struct CommentService {
    repo: Arc<dyn Repository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Comments on a task the tenant owns, newest first; otherwise empty
    pub async fn list(&self, ctx: &TenantContext, task_id: i64) -> Result<Vec<TaskComment>, ServiceError> {
        let Ok(org) = require_tenant(ctx) else {
            return Ok(Vec::new());
        };
        let repo = self.repo.as_ref();
        match ownership::find_owned::<Task>(repo, org, task_id).await? {
            Some(task) => Ok(repo.list_comments(task.id).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn add(
        &self,
        ctx: &TenantContext,
        task_id: i64,
        input: AddComment,
    ) -> Result<Outcome<TaskComment>, ServiceError> {
        let org = require_tenant(ctx)?;
        let task: Task = ownership::verify(self.repo.as_ref(), org, task_id).await?;

        let mut v = Validator::new();
        if input.content.trim().is_empty() {
            v.add("content", "This field is required");
        }
        v.email("author_email", &input.author_email);
        v.finish()?;

        let new = NewComment {
            content: input.content,
            author_email: input.author_email,
        };
        let comment = self.repo.insert_comment(task.id, new).await?;
        info!("Added comment {} to task {} ('{}')", comment.id, task.id, org.slug);
        Ok(Outcome::ok(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewOrganization, NewProject, NewTask};
    use crate::database::MemoryRepository;
    use crate::types::{ProjectStatus, TaskStatus};

    /// acme owns project P which owns task T; globex owns nothing
    async fn fixture() -> (CommentService, TenantContext, TenantContext, i64) {
        let repo = Arc::new(MemoryRepository::new());
        let mut contexts = Vec::new();
        for slug in ["acme", "globex"] {
            let org = repo
                .insert_organization(NewOrganization {
                    name: slug.to_string(),
                    slug: slug.to_string(),
                    contact_email: format!("ops@{slug}.test"),
                })
                .await
                .unwrap();
            contexts.push(TenantContext::Resolved(org));
        }
        let acme_id = contexts[0].organization().unwrap().id;
        let project = repo
            .insert_project(
                acme_id,
                NewProject {
                    name: "P".to_string(),
                    description: String::new(),
                    status: ProjectStatus::Active,
                    due_date: None,
                },
            )
            .await
            .unwrap();
        let task = repo
            .insert_task(
                project.id,
                NewTask {
                    title: "T".to_string(),
                    description: String::new(),
                    status: TaskStatus::Todo,
                    assignee_email: String::new(),
                    due_date: None,
                },
            )
            .await
            .unwrap();
        let globex = contexts.pop().unwrap();
        let acme = contexts.pop().unwrap();
        (CommentService::new(repo), acme, globex, task.id)
    }

    fn comment(content: &str) -> AddComment {
        AddComment {
            content: content.to_string(),
            author_email: "kim@acme.test".to_string(),
        }
    }

    #[tokio::test]
    async fn owner_can_comment_other_tenant_cannot() {
        let (svc, acme, globex, task_id) = fixture().await;

        let added = svc.add(&acme, task_id, comment("Looks good")).await.unwrap();
        assert!(added.ok);
        assert_eq!(added.entity.content, "Looks good");

        let err = svc.add(&globex, task_id, comment("Hi")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Task")));
        assert_eq!(svc.list(&acme, task_id).await.unwrap().len(), 1);
        assert!(svc.list(&globex, task_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_tenant_fails_before_lookup() {
        let (svc, _, _, task_id) = fixture().await;
        let err = svc.add(&TenantContext::Missing, task_id, comment("x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::TenantNotResolved));
    }

    #[tokio::test]
    async fn comments_newest_first() {
        let (svc, acme, _, task_id) = fixture().await;
        svc.add(&acme, task_id, comment("one")).await.unwrap();
        svc.add(&acme, task_id, comment("two")).await.unwrap();

        let listed = svc.list(&acme, task_id).await.unwrap();
        assert_eq!(listed[0].content, "two");
        assert_eq!(listed[1].content, "one");
    }
}
