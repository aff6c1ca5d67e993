use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{NewOrganization, Organization};
use crate::database::{DatabaseError, Repository};

use super::error::ServiceError;
use super::slug::slugify;
use super::validation::{Validator, ORGANIZATION_NAME_MAX, SLUG_MAX};
use super::Outcome;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub contact_email: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// The two public operations. Neither goes through the gate: creating an
/// organization is how a tenant comes into existence.
#[derive(Clone)]
pub struct OrganizationService {
    repo: Arc<dyn Repository>,
}

impl OrganizationService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Every organization, ordered by name
    pub async fn list(&self) -> Result<Vec<Organization>, ServiceError> {
        Ok(self.repo.list_organizations().await?)
    }

    pub async fn create(&self, input: CreateOrganization) -> Result<Outcome<Organization>, ServiceError> {
        // A blank slug argument counts as absent
        let source = input
            .slug
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&input.name);
        let slug = slugify(source);

        let mut v = Validator::new();
        v.required_text("name", &input.name, ORGANIZATION_NAME_MAX);
        v.email("contact_email", &input.contact_email);
        if slug.is_empty() {
            v.add("slug", "Slug is empty after normalization");
        } else {
            v.max_len("slug", &slug, SLUG_MAX);
        }
        v.finish()?;

        if self.repo.find_organization_by_slug(&slug).await?.is_some() {
            return Err(ServiceError::SlugTaken(slug));
        }

        let new = NewOrganization {
            name: input.name,
            slug: slug.clone(),
            contact_email: input.contact_email,
        };
        // The unique index still decides when two creates race past the check above
        let organization = match self.repo.insert_organization(new).await {
            Ok(org) => org,
            Err(DatabaseError::UniqueViolation(_)) => return Err(ServiceError::SlugTaken(slug)),
            Err(e) => return Err(e.into()),
        };

        info!("Created organization '{}' ({})", organization.slug, organization.id);
        Ok(Outcome::ok(organization))
    }
}
