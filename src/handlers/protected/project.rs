use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::Project;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{CreateProject, UpdateProject};
use crate::tenant::TenantContext;

/// GET /api/projects - the tenant's projects, newest first
pub async fn list(State(state): State<AppState>, tenant: TenantContext) -> ApiResult<Vec<Project>> {
    let projects = state.projects.list(&tenant).await?;
    Ok(ApiResponse::success(projects))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    let outcome = state.projects.create(&tenant, input).await?;
    Ok(ApiResponse::created(outcome.into_payload("project")?))
}

/// PATCH /api/projects/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProject>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let outcome = state.projects.update(&tenant, id, input).await?;
    Ok(ApiResponse::success(outcome.into_payload("project")?))
}
