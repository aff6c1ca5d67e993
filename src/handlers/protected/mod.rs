// handlers/protected/mod.rs - Tenant-scoped handlers
//
// Handlers take the request's TenantContext and hand it to the service,
// which runs the gate before touching the store. Ids from the path are only
// ever resolved through the ownership chain of the gated tenant.

pub mod comment;
pub mod project;
pub mod task;
