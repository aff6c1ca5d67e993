use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::*;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum OrgCommands {
    #[command(about = "List all organizations")]
    List,

    #[command(about = "Create an organization")]
    Create {
        #[arg(help = "Organization name")]
        name: String,
        #[arg(help = "Contact email")]
        contact_email: String,
        #[arg(long, help = "URL-safe identifier (derived from the name when omitted)")]
        slug: Option<String>,
    },

    #[command(about = "Act as the organization with this slug")]
    Use {
        #[arg(help = "Organization slug")]
        slug: String,
    },

    #[command(about = "Show the organization the server resolves for the current slug")]
    Current,
}

pub async fn handle(cmd: OrgCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = ApiClient::from_config(&config);

    match cmd {
        OrgCommands::List => {
            let orgs = client.get("/api/organizations").await?;
            let current = config.current_org.as_deref();
            let orgs = mark_current(orgs, current);

            output_collection(
                &output_format,
                "organizations",
                &orgs,
                &[("", "current", 1), ("ID", "id", 6), ("SLUG", "slug", 20), ("NAME", "name", 30), ("CONTACT", "contact_email", 30)],
            )
        }
        OrgCommands::Create { name, contact_email, slug } => {
            let body = json!({ "name": name, "contact_email": contact_email, "slug": slug });
            let data = client.post("/api/organizations", &body).await?;
            let created = &data["organization"];

            output_success(
                &output_format,
                &format!(
                    "Organization '{}' created with slug '{}'",
                    created["name"].as_str().unwrap_or_default(),
                    created["slug"].as_str().unwrap_or_default()
                ),
                Some(data.clone()),
            )
        }
        OrgCommands::Use { slug } => {
            let orgs = client.get("/api/organizations").await?;
            let exists = orgs
                .as_array()
                .is_some_and(|list| list.iter().any(|o| o["slug"].as_str() == Some(slug.as_str())));
            if !exists {
                return Err(anyhow::anyhow!("Organization '{}' not found", slug));
            }

            let mut config = config;
            config.set_org(&slug);
            save_config(&config)?;

            output_success(
                &output_format,
                &format!("Switched to organization '{}'", slug),
                Some(json!({ "current_org": slug })),
            )
        }
        OrgCommands::Current => {
            if client.org().is_none() {
                return output_no_current_item(&output_format, "organization");
            }
            let org = client.get("/api/organizations/current").await?;
            match org.get("slug").and_then(Value::as_str) {
                Some(slug) => output_current_item(&output_format, "organization", slug, org.clone()),
                None => Err(anyhow::anyhow!(
                    "Organization '{}' is not known to the server",
                    client.org().unwrap_or_default()
                )),
            }
        }
    }
}

fn mark_current(mut orgs: Value, current: Option<&str>) -> Value {
    if let Some(list) = orgs.as_array_mut() {
        for org in list {
            let is_current = current.is_some() && org["slug"].as_str() == current;
            org["current"] = json!(if is_current { "*" } else { " " });
        }
    }
    orgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_only_selected_slug() {
        let orgs = json!([{ "slug": "acme" }, { "slug": "globex" }]);
        let marked = mark_current(orgs, Some("globex"));
        assert_eq!(marked[0]["current"], " ");
        assert_eq!(marked[1]["current"], "*");
    }

    #[test]
    fn nothing_marked_without_selection() {
        let marked = mark_current(json!([{ "slug": "acme" }]), None);
        assert_eq!(marked[0]["current"], " ");
    }
}
