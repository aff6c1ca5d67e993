use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::Organization;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CreateOrganization;
use crate::tenant::TenantContext;

/// GET /api/organizations - every organization, by name
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Organization>> {
    let organizations = state.organizations.list().await?;
    Ok(ApiResponse::success(organizations))
}

/// POST /api/organizations - create a tenant
///
/// Input: `{"name": "Acme", "contact_email": "ops@acme.test", "slug": "acme"?}`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrganization>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    let outcome = state.organizations.create(input).await?;
    Ok(ApiResponse::created(outcome.into_payload("organization")?))
}

/// GET /api/organizations/current - what the resolver made of the tenant header.
/// `null` when the header is absent or unknown.
pub async fn current(tenant: TenantContext) -> ApiResult<Option<Organization>> {
    Ok(ApiResponse::success(tenant.organization().cloned()))
}
