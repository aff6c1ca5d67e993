use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::tenant_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List the current organization's projects, newest first")]
    List,

    #[command(about = "Create a project")]
    Create {
        #[arg(help = "Project name")]
        name: String,
        #[arg(long, default_value = "ACTIVE", help = "ACTIVE, COMPLETED or ON_HOLD")]
        status: String,
        #[arg(long, help = "Free-form description")]
        description: Option<String>,
        #[arg(long, help = "Due date (YYYY-MM-DD)")]
        due: Option<String>,
    },

    #[command(about = "Update selected fields of a project")]
    Update {
        #[arg(help = "Project ID")]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, help = "ACTIVE, COMPLETED or ON_HOLD")]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Due date (YYYY-MM-DD)")]
        due: Option<String>,
    },
}

pub async fn handle(cmd: ProjectCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = tenant_client()?;

    match cmd {
        ProjectCommands::List => {
            let projects = client.get("/api/projects").await?;
            output_collection(
                &output_format,
                "projects",
                &projects,
                &[
                    ("ID", "id", 6),
                    ("NAME", "name", 30),
                    ("STATUS", "status", 10),
                    ("DUE", "due_date", 10),
                    ("TASKS", "task_count", 5),
                    ("DONE", "completed_tasks", 5),
                ],
            )
        }
        ProjectCommands::Create { name, status, description, due } => {
            let body = json!({ "name": name, "status": status, "description": description, "due_date": due });
            let data = client.post("/api/projects", &body).await?;
            output_success(
                &output_format,
                &format!("Project {} created", data["project"]["id"]),
                Some(data.clone()),
            )
        }
        ProjectCommands::Update { id, name, status, description, due } => {
            let body = json!({ "name": name, "status": status, "description": description, "due_date": due });
            let data = client.patch(&format!("/api/projects/{}", id), &body).await?;
            output_success(&output_format, &format!("Project {} updated", id), Some(data.clone()))
        }
    }
}
