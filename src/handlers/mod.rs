// handlers/mod.rs - Two-tier handler layout
//
// Public: no tenant required (/, /health, /api/organizations*)
// Protected: tenant-scoped (/api/projects*, /api/tasks*); each handler's
// service call opens with the authorization gate

pub mod protected;
pub mod public;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "orgtrack-api",
            "version": version,
            "tenant_header": state.tenant_header.as_str(),
            "endpoints": {
                "organizations": "/api/organizations[/current] (public)",
                "projects": "/api/projects[/:id] (tenant)",
                "tasks": "/api/projects/:project_id/tasks, /api/tasks/:id (tenant)",
                "comments": "/api/tasks/:task_id/comments (tenant)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.repo.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
