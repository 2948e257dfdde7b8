//! Storage ports — repository traits for the catalog and the directory.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use khair_domain::error::KhairError;
use khair_domain::id::{OrganizationId, ServiceId};
use khair_domain::organization::Organization;
use khair_domain::service::Service;

/// Read access to the fixed service catalog, plus its bootstrap seed.
pub trait ServiceCatalog {
    /// Insert `services`, leaving ids that already exist untouched.
    ///
    /// Resolves to the number of newly inserted services.
    fn seed(&self, services: Vec<Service>) -> impl Future<Output = Result<usize, KhairError>> + Send;

    /// Get every service in the catalog, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, KhairError>> + Send;

    /// Get the services whose id is in `ids`, ordered by id.
    ///
    /// Unknown ids are skipped, not reported.
    fn get_by_ids(
        &self,
        ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<Vec<Service>, KhairError>> + Send;
}

/// Persistence for [`Organization`]s and their service associations.
pub trait OrganizationRepository {
    /// Persist a new organization (its `services` field is ignored).
    ///
    /// Fails with [`KhairError::AlreadyExists`] when the id is taken.
    fn create(
        &self,
        organization: Organization,
    ) -> impl Future<Output = Result<Organization, KhairError>> + Send;

    /// Get an organization, with its attached services, by id.
    fn get_by_id(
        &self,
        id: &OrganizationId,
    ) -> impl Future<Output = Result<Option<Organization>, KhairError>> + Send;

    /// Delete an organization and its service associations.
    ///
    /// Resolves to `false` when nothing was deleted.
    fn delete(&self, id: &OrganizationId) -> impl Future<Output = Result<bool, KhairError>> + Send;

    /// Associate services with an organization.
    ///
    /// Pairs that already exist are ignored.
    fn attach_services(
        &self,
        id: &OrganizationId,
        service_ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<(), KhairError>> + Send;

    /// Find every organization whose attached services include all of
    /// `service_ids`, ordered by organization id, with services loaded.
    fn find_by_services(
        &self,
        service_ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<Vec<Organization>, KhairError>> + Send;
}

impl<T: ServiceCatalog + Send + Sync> ServiceCatalog for Arc<T> {
    fn seed(&self, services: Vec<Service>) -> impl Future<Output = Result<usize, KhairError>> + Send {
        (**self).seed(services)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, KhairError>> + Send {
        (**self).get_all()
    }

    fn get_by_ids(
        &self,
        ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<Vec<Service>, KhairError>> + Send {
        (**self).get_by_ids(ids)
    }
}

impl<T: OrganizationRepository + Send + Sync> OrganizationRepository for Arc<T> {
    fn create(
        &self,
        organization: Organization,
    ) -> impl Future<Output = Result<Organization, KhairError>> + Send {
        (**self).create(organization)
    }

    fn get_by_id(
        &self,
        id: &OrganizationId,
    ) -> impl Future<Output = Result<Option<Organization>, KhairError>> + Send {
        (**self).get_by_id(id)
    }

    fn delete(&self, id: &OrganizationId) -> impl Future<Output = Result<bool, KhairError>> + Send {
        (**self).delete(id)
    }

    fn attach_services(
        &self,
        id: &OrganizationId,
        service_ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<(), KhairError>> + Send {
        (**self).attach_services(id, service_ids)
    }

    fn find_by_services(
        &self,
        service_ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<Vec<Organization>, KhairError>> + Send {
        (**self).find_by_services(service_ids)
    }
}
