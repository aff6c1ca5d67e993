use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tenant. The slug is the only key the tenant resolver looks up by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for inserting an organization; the slug is already normalized
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub slug: String,
    pub contact_email: String,
}
