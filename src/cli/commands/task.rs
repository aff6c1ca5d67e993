use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::tenant_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TaskCommands {
    #[command(about = "List a project's tasks, newest first")]
    List {
        #[arg(help = "Project ID")]
        project_id: i64,
    },

    #[command(about = "Create a task in a project")]
    Create {
        #[arg(help = "Project ID")]
        project_id: i64,
        #[arg(help = "Task title")]
        title: String,
        #[arg(long, default_value = "TODO", help = "TODO, IN_PROGRESS or DONE")]
        status: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Assignee email")]
        assignee: Option<String>,
        #[arg(long, help = "Due timestamp (RFC 3339)")]
        due: Option<String>,
    },

    #[command(about = "Update selected fields of a task")]
    Update {
        #[arg(help = "Task ID")]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, help = "TODO, IN_PROGRESS or DONE")]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Assignee email")]
        assignee: Option<String>,
        #[arg(long, help = "Due timestamp (RFC 3339)")]
        due: Option<String>,
    },
}

pub async fn handle(cmd: TaskCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = tenant_client()?;

    match cmd {
        TaskCommands::List { project_id } => {
            let tasks = client.get(&format!("/api/projects/{}/tasks", project_id)).await?;
            output_collection(
                &output_format,
                "tasks",
                &tasks,
                &[
                    ("ID", "id", 6),
                    ("TITLE", "title", 30),
                    ("STATUS", "status", 11),
                    ("ASSIGNEE", "assignee_email", 25),
                    ("DUE", "due_date", 20),
                    ("COMMENTS", "comments", 8),
                ],
            )
        }
        TaskCommands::Create { project_id, title, status, description, assignee, due } => {
            let body = json!({
                "title": title,
                "status": status,
                "description": description,
                "assignee_email": assignee,
                "due_date": due,
            });
            let data = client.post(&format!("/api/projects/{}/tasks", project_id), &body).await?;
            output_success(
                &output_format,
                &format!("Task {} created in project {}", data["task"]["id"], project_id),
                Some(data.clone()),
            )
        }
        TaskCommands::Update { id, title, status, description, assignee, due } => {
            let body = json!({
                "title": title,
                "status": status,
                "description": description,
                "assignee_email": assignee,
                "due_date": due,
            });
            let data = client.patch(&format!("/api/tasks/{}", id), &body).await?;
            output_success(&output_format, &format!("Task {} updated", id), Some(data.clone()))
        }
    }
}
