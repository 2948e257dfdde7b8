//! Organization service — use-cases for the organization directory.

use khair_domain::error::{ConstraintViolation, KhairError, NotFoundError};
use khair_domain::id::{OrganizationId, ServiceId};
use khair_domain::organization::Organization;
use khair_domain::service::{Service, id_set};

use crate::ports::{OrganizationRepository, ServiceCatalog};
use crate::services::catalog_service::CatalogService;

/// Application service for organization CRUD and service attachment.
pub struct OrganizationService<R, C> {
    repo: R,
    catalog: CatalogService<C>,
}

impl<R, C> OrganizationService<R, C>
where
    R: OrganizationRepository,
    C: ServiceCatalog,
{
    /// Create a new service backed by the given directory and catalog.
    pub fn new(repo: R, catalog: C) -> Self {
        Self {
            repo,
            catalog: CatalogService::new(catalog),
        }
    }

    /// Register a new organization after validating domain invariants.
    ///
    /// Any services on the payload are dropped; they are attached separately.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::ConstraintViolation`] if invariants fail,
    /// [`KhairError::AlreadyExists`] for a duplicate id, or a storage error.
    #[tracing::instrument(skip(self, organization), fields(organization_id = %organization.id))]
    pub async fn create_organization(
        &self,
        mut organization: Organization,
    ) -> Result<Organization, KhairError> {
        organization.validate()?;
        organization.services.clear();
        self.repo.create(organization).await
    }

    /// Look up an organization by id, with its attached services.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::NotFound`] when no organization with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_organization(&self, id: &OrganizationId) -> Result<Organization, KhairError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| organization_not_found(id).into())
    }

    /// Delete an organization and its service associations.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::NotFound`] when no organization with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_organization(&self, id: &OrganizationId) -> Result<(), KhairError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(organization_not_found(id).into())
        }
    }

    /// Attach catalog services to an organization.
    ///
    /// Attaching a service the organization already offers is a no-op.
    /// Returns the resolved records of the requested ids.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::NotFound`] when the organization or any of the
    /// services does not exist, or a storage error.
    #[tracing::instrument(skip(self, service_ids))]
    pub async fn attach_services(
        &self,
        id: &OrganizationId,
        service_ids: Vec<ServiceId>,
    ) -> Result<Vec<Service>, KhairError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(organization_not_found(id).into());
        }

        let services = self.catalog.validate_service_ids(service_ids).await?;
        if services.is_empty() {
            return Ok(services);
        }

        let ids = id_set(services.iter().map(|s| s.id.clone()));
        self.repo.attach_services(id, &ids).await?;
        tracing::debug!(attached = services.len(), "services attached");
        Ok(services)
    }

    /// List the services an organization offers.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::NotFound`] when the organization does not exist
    /// or offers no services, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn services_of(&self, id: &OrganizationId) -> Result<Vec<Service>, KhairError> {
        let organization = self.get_organization(id).await?;
        if organization.services.is_empty() {
            return Err(NotFoundError {
                entity: "Services of organization",
                id: id.to_string(),
            }
            .into());
        }
        Ok(organization.services)
    }

    /// Find every organization offering all of `service_ids`.
    ///
    /// Results are ordered by organization id.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::EmptyServiceSet`] when no id is given,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, service_ids))]
    pub async fn find_by_services(
        &self,
        service_ids: Vec<ServiceId>,
    ) -> Result<Vec<Organization>, KhairError> {
        let ids = id_set(service_ids);
        if ids.is_empty() {
            return Err(ConstraintViolation::EmptyServiceSet.into());
        }
        self.repo.find_by_services(&ids).await
    }
}

fn organization_not_found(id: &OrganizationId) -> NotFoundError {
    NotFoundError {
        entity: "Organization",
        id: id.to_string(),
    }
}
