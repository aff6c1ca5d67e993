use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::Task;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{CreateTask, UpdateTask};
use crate::tenant::TenantContext;

/// GET /api/projects/:project_id/tasks - newest first, comments included
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
    project_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<Task>> {
    let Path(project_id) = project_id?;
    let tasks = state.tasks.list(&tenant, project_id).await?;
    Ok(ApiResponse::success(tasks))
}

/// POST /api/projects/:project_id/tasks
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    project_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(project_id) = project_id?;
    let Json(input) = payload?;
    let outcome = state.tasks.create(&tenant, project_id, input).await?;
    Ok(ApiResponse::created(outcome.into_payload("task")?))
}

/// PATCH /api/tasks/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let outcome = state.tasks.update(&tenant, id, input).await?;
    Ok(ApiResponse::success(outcome.into_payload("task")?))
}
