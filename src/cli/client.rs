use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use crate::cli::config::CliConfig;

/// Thin HTTP client for the orgtrack API. Unwraps the `{"success", "data"}`
/// envelope and turns `{"success": false}` bodies into errors.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tenant_header: String,
    org: Option<String>,
}

impl ApiClient {
    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.server_url().to_string(),
            tenant_header: config.tenant_header().to_string(),
            org: config.current_org.clone(),
        }
    }

    /// Client for `base_url` with no organization selected
    pub fn anonymous(base_url: &str) -> Self {
        Self::from_config(&CliConfig {
            server_url: Some(base_url.to_string()),
            ..CliConfig::default()
        })
    }

    pub fn org(&self) -> Option<&str> {
        self.org.as_deref()
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match &self.org {
            Some(slug) => builder.header(self.tenant_header.as_str(), slug),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> anyhow::Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        if body["success"].as_bool() == Some(true) {
            return Ok(body["data"].clone());
        }

        let message = body["error"].as_str().unwrap_or("request failed");
        let code = body["code"].as_str().unwrap_or("UNKNOWN");
        match body.get("field_errors").and_then(Value::as_object) {
            Some(fields) => {
                let details: Vec<String> = fields
                    .iter()
                    .map(|(field, err)| format!("{}: {}", field, err.as_str().unwrap_or_default()))
                    .collect();
                Err(anyhow::anyhow!("{} ({} {}): {}", message, status.as_u16(), code, details.join("; ")))
            }
            None => Err(anyhow::anyhow!("{} ({} {})", message, status.as_u16(), code)),
        }
    }
}
