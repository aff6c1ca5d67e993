use std::collections::BTreeMap;

use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Failures of the scoped operations. Each one is local to a single call.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Organization context missing")]
    TenantNotResolved,

    /// Also used when the id exists under another tenant
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Organization with slug '{0}' already exists")]
    SlugTaken(String),

    #[error("Invalid input: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Validation(BTreeMap<String, String>),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
