// handlers/public/mod.rs - Handlers reachable without a resolved tenant
//
// Listing and creating organizations must keep working when the tenant
// header is absent or names an unknown slug.

pub mod organization;
