//! Tenant isolation.
//!
//! Resolution and enforcement are two separate stages. The resolver
//! middleware (`middleware::resolve_tenant`) only ever attaches a
//! [`TenantContext`] to the request; it never fails. Handlers for
//! tenant-scoped operations then call [`require_tenant`], the one place where
//! a missing tenant becomes an error, and reach entities by id only through
//! [`ownership::verify`].

pub mod context;
pub mod gate;
pub mod ownership;

pub use context::TenantContext;
pub use gate::require_tenant;
pub use ownership::Owned;
