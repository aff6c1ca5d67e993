pub mod comment;
pub mod organization;
pub mod project;
pub mod task;

pub use comment::{NewComment, TaskComment};
pub use organization::{NewOrganization, Organization};
pub use project::{NewProject, Project, ProjectPatch};
pub use task::{NewTask, Task, TaskPatch};
