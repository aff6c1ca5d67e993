use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::*;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Point the CLI at an orgtrack API server")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:8000")]
        url: String,
        #[arg(long, help = "Tenant header name (read from the server when omitted)")]
        tenant_header: Option<String>,
    },

    #[command(about = "Show the configured server and its health")]
    Show,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Set { url, tenant_header } => {
            reqwest::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;

            let tenant_header = match tenant_header {
                Some(header) => Some(header),
                None => discover_tenant_header(url.trim_end_matches('/')).await,
            };

            let mut config = load_config()?;
            config.set_server(&url, tenant_header);
            save_config(&config)?;

            output_success(
                &output_format,
                &format!("Server set to {}", config.server_url()),
                Some(json!({
                    "server_url": config.server_url(),
                    "tenant_header": config.tenant_header(),
                })),
            )
        }
        ServerCommands::Show => {
            let config = load_config()?;
            let url = config.server_url();
            let status = ping_server(url).await;

            let details = json!({
                "url": url,
                "status": status,
                "tenant_header": config.tenant_header(),
                "updated_at": config.updated_at,
            });
            output_current_item(&output_format, "server", url, details)
        }
    }
}

/// Header name the server advertises on `GET /`; `None` keeps the default
async fn discover_tenant_header(url: &str) -> Option<String> {
    match ApiClient::anonymous(url).get("/").await {
        Ok(info) => info["tenant_header"].as_str().map(str::to_string),
        Err(e) => {
            tracing::warn!("Could not read server info from {}: {}; using default tenant header", url, e);
            None
        }
    }
}
