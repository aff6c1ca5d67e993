pub mod comment_service;
pub mod error;
pub mod organization_service;
pub mod project_service;
pub mod slug;
pub mod task_service;
pub mod validation;

use serde_json::{json, Value};

pub use comment_service::{AddComment, CommentService};
pub use error::ServiceError;
pub use organization_service::{CreateOrganization, OrganizationService};
pub use project_service::{CreateProject, ProjectService, UpdateProject};
pub use task_service::{CreateTask, TaskService, UpdateTask};

/// Result of a mutation: the affected entity plus the success flag callers check
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub ok: bool,
    pub entity: T,
}

impl<T: serde::Serialize> Outcome<T> {
    pub fn ok(entity: T) -> Self {
        Self { ok: true, entity }
    }

    /// `{"ok": true, "<key>": entity}`
    pub fn into_payload(self, key: &str) -> Result<Value, serde_json::Error> {
        let mut payload = json!({ "ok": self.ok });
        payload[key] = serde_json::to_value(self.entity)?;
        Ok(payload)
    }
}
