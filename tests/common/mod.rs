#![allow(dead_code)]

use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use orgtrack_api::app::{app, AppState};
use orgtrack_api::config::{AppConfig, DEFAULT_TENANT_HEADER};
use orgtrack_api::database::MemoryRepository;

static TRACING: Once = Once::new();

/// In-process router over a fresh in-memory store; no port, no database
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        TRACING.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });

        let config = AppConfig::development();
        let state = AppState::new(Arc::new(MemoryRepository::new()), &config)?;
        Ok(Self { router: app(state, &config) })
    }

    /// Send one request, optionally as the organization `slug`. Returns status and JSON body.
    pub async fn send(&self, method: Method, uri: &str, slug: Option<&str>, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(slug) = slug {
            builder = builder.header(DEFAULT_TENANT_HEADER, slug);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let json = serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", uri))?;
        Ok((status, json))
    }

    pub async fn get(&self, uri: &str, slug: Option<&str>) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, slug, None).await
    }

    pub async fn post(&self, uri: &str, slug: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, slug, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, slug: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PATCH, uri, slug, Some(body)).await
    }

    pub async fn create_org(&self, name: &str, slug: &str) -> Result<Value> {
        let (status, body) = self
            .post(
                "/api/organizations",
                None,
                json!({ "name": name, "slug": slug, "contact_email": format!("ops@{}.test", slug) }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create org {}: {} {}", slug, status, body);
        Ok(body["data"]["organization"].clone())
    }

    pub async fn create_project(&self, slug: &str, name: &str) -> Result<i64> {
        let (status, body) = self
            .post("/api/projects", Some(slug), json!({ "name": name, "status": "ACTIVE" }))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create project {}: {} {}", name, status, body);
        body["data"]["project"]["id"].as_i64().context("project id")
    }

    pub async fn create_task(&self, slug: &str, project_id: i64, title: &str) -> Result<i64> {
        let (status, body) = self
            .post(
                &format!("/api/projects/{}/tasks", project_id),
                Some(slug),
                json!({ "title": title, "status": "TODO" }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create task {}: {} {}", title, status, body);
        body["data"]["task"]["id"].as_i64().context("task id")
    }
}
