use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TENANT_HEADER;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Persisted CLI selection: which server to talk to and which organization to act as
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    pub server_url: Option<String>,
    pub current_org: Option<String>,
    /// Header the server reads the organization slug from, as reported by its `GET /`
    #[serde(default)]
    pub tenant_header: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
}

impl CliConfig {
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn tenant_header(&self) -> &str {
        self.tenant_header.as_deref().unwrap_or(DEFAULT_TENANT_HEADER)
    }

    pub fn set_server(&mut self, url: &str, tenant_header: Option<String>) {
        self.server_url = Some(url.trim_end_matches('/').to_string());
        self.tenant_header = tenant_header;
        self.updated_at = Some(Utc::now());
    }

    pub fn set_org(&mut self, slug: &str) {
        self.current_org = Some(slug.to_string());
        self.updated_at = Some(Utc::now());
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("ORGTRACK_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("orgtrack").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_config() -> anyhow::Result<CliConfig> {
    let config_file = get_config_dir()?.join("env.json");

    if !config_file.exists() {
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(config_file)?;
    let config: CliConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let config_file = get_config_dir()?.join("env.json");

    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_file, content)?;
    Ok(())
}

pub async fn ping_server(url: &str) -> ServerStatus {
    let client = reqwest::Client::new();
    let url = format!("{}/health", url);

    match client.get(&url).timeout(std::time::Duration::from_secs(5)).send().await {
        Ok(response) if response.status().is_success() => ServerStatus::Up,
        _ => ServerStatus::Down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults_to_localhost() {
        assert_eq!(CliConfig::default().server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let mut config = CliConfig::default();
        config.set_server("https://track.example.test/", None);
        assert_eq!(config.server_url(), "https://track.example.test");
        assert!(config.updated_at.is_some());
    }

    #[test]
    fn tenant_header_follows_server() {
        let mut config = CliConfig::default();
        assert_eq!(config.tenant_header(), DEFAULT_TENANT_HEADER);

        config.set_server("http://localhost:9000", Some("x-tenant".to_string()));
        assert_eq!(config.tenant_header(), "x-tenant");

        // Switching servers forgets the old server's header
        config.set_server("http://localhost:8000", None);
        assert_eq!(config.tenant_header(), DEFAULT_TENANT_HEADER);
    }

    #[test]
    fn reads_older_files_without_timestamp() {
        let config: CliConfig = serde_json::from_str(r#"{"current_org":"acme"}"#).unwrap();
        assert_eq!(config.current_org.as_deref(), Some("acme"));
        assert!(config.server_url.is_none());
        assert_eq!(config.tenant_header(), DEFAULT_TENANT_HEADER);
    }
}
