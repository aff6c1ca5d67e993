use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::tenant_client;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum CommentCommands {
    #[command(about = "List a task's comments, newest first")]
    List {
        #[arg(help = "Task ID")]
        task_id: i64,
    },

    #[command(about = "Comment on a task")]
    Add {
        #[arg(help = "Task ID")]
        task_id: i64,
        #[arg(help = "Comment text")]
        content: String,
        #[arg(long, help = "Author email")]
        author: String,
    },
}

pub async fn handle(cmd: CommentCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = tenant_client()?;

    match cmd {
        CommentCommands::List { task_id } => {
            let comments = client.get(&format!("/api/tasks/{}/comments", task_id)).await?;
            output_collection(
                &output_format,
                "comments",
                &comments,
                &[("ID", "id", 6), ("AUTHOR", "author_email", 25), ("CREATED", "created_at", 25), ("CONTENT", "content", 50)],
            )
        }
        CommentCommands::Add { task_id, content, author } => {
            let body = json!({ "content": content, "author_email": author });
            let data = client.post(&format!("/api/tasks/{}/comments", task_id), &body).await?;
            output_success(
                &output_format,
                &format!("Comment {} added to task {}", data["comment"]["id"], task_id),
                Some(data.clone()),
            )
        }
    }
}
