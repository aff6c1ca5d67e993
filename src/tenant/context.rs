use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::database::models::Organization;

/// Per-request tenant, fixed once the resolver has run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TenantContext {
    Resolved(Organization),
    /// No key, or a key that matched no organization. Ordinary data, not an error.
    #[default]
    Missing,
}

impl TenantContext {
    pub fn organization(&self) -> Option<&Organization> {
        match self {
            TenantContext::Resolved(org) => Some(org),
            TenantContext::Missing => None,
        }
    }
}

/// Reads the context the resolver attached. A route mounted without the
/// resolver sees `Missing`, so the gate still refuses it.
#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<TenantContext>().cloned().unwrap_or_default())
    }
}
