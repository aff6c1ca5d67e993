use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::TaskComment;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AddComment;
use crate::tenant::TenantContext;

/// GET /api/tasks/:task_id/comments
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
    task_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<TaskComment>> {
    let Path(task_id) = task_id?;
    let comments = state.comments.list(&tenant, task_id).await?;
    Ok(ApiResponse::success(comments))
}

/// POST /api/tasks/:task_id/comments
pub async fn add(
    State(state): State<AppState>,
    tenant: TenantContext,
    task_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddComment>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(task_id) = task_id?;
    let Json(input) = payload?;
    let outcome = state.comments.add(&tenant, task_id, input).await?;
    Ok(ApiResponse::created(outcome.into_payload("comment")?))
}
