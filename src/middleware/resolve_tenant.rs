use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::database::Repository;
use crate::tenant::TenantContext;

/// Attaches a [`TenantContext`] to every request and always passes it on.
///
/// A missing header, an unreadable header, an unknown slug and a failed lookup
/// all produce `TenantContext::Missing`. Refusing the request is left to the
/// gate inside each tenant-scoped handler, so the public organization routes
/// stay reachable with a bad key.
pub async fn resolve_tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let slug = tenant_key(request.headers(), state.tenant_header.as_str());
    let context = match slug {
        Some(slug) => resolve(state.repo.as_ref(), &slug).await,
        None => TenantContext::Missing,
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Trimmed header value; blank counts as absent
fn tenant_key(headers: &HeaderMap, header: &str) -> Option<String> {
    let value = headers.get(header)?.to_str().ok()?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

async fn resolve(repo: &dyn Repository, slug: &str) -> TenantContext {
    match repo.find_organization_by_slug(slug).await {
        Ok(Some(org)) => {
            tracing::debug!("Resolved organization '{}' ({})", org.slug, org.id);
            TenantContext::Resolved(org)
        }
        Ok(None) => {
            tracing::warn!("Unknown organization slug '{}'; continuing without tenant", slug);
            TenantContext::Missing
        }
        Err(e) => {
            tracing::error!("Organization lookup for '{}' failed: {}", slug, e);
            TenantContext::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_and_trims_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-org-slug", HeaderValue::from_static("  acme "));
        assert_eq!(tenant_key(&headers, "x-org-slug").as_deref(), Some("acme"));
    }

    #[test]
    fn blank_or_absent_header_is_none() {
        let mut headers = HeaderMap::new();
        assert!(tenant_key(&headers, "x-org-slug").is_none());
        headers.insert("x-org-slug", HeaderValue::from_static("   "));
        assert!(tenant_key(&headers, "x-org-slug").is_none());
    }

    #[tokio::test]
    async fn unknown_slug_resolves_to_missing() {
        let repo = crate::database::MemoryRepository::new();
        assert_eq!(resolve(&repo, "nobody").await, TenantContext::Missing);
    }
}
