pub mod comment;
pub mod org;
pub mod project;
pub mod server;
pub mod task;

use crate::cli::client::ApiClient;
use crate::cli::config::load_config;

/// Client for tenant-scoped commands; refuses to run without a selected organization
pub(crate) fn tenant_client() -> anyhow::Result<ApiClient> {
    let client = ApiClient::from_config(&load_config()?);
    if client.org().is_none() {
        return Err(anyhow::anyhow!("No current organization set. Use 'orgtrack org use <slug>' first"));
    }
    Ok(client)
}
