use crate::database::models::Organization;
use crate::services::ServiceError;

use super::context::TenantContext;

/// The authorization gate. First call in every tenant-scoped operation.
///
/// Pure: looks only at the context, never at the store.
pub fn require_tenant(ctx: &TenantContext) -> Result<&Organization, ServiceError> {
    match ctx {
        TenantContext::Resolved(org) => Ok(org),
        TenantContext::Missing => {
            tracing::debug!("Gate refused operation: no organization in request context");
            Err(ServiceError::TenantNotResolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn resolved_context_yields_organization() {
        let org = Organization {
            id: 3,
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            contact_email: "ops@acme.test".to_string(),
            created_at: Utc::now(),
        };
        let ctx = TenantContext::Resolved(org.clone());
        assert_eq!(require_tenant(&ctx).unwrap(), &org);
    }

    #[test]
    fn missing_context_is_tenant_not_resolved() {
        let err = require_tenant(&TenantContext::Missing).unwrap_err();
        assert!(matches!(err, ServiceError::TenantNotResolved));
    }
}
