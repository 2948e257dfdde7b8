//! In-memory port implementations shared by the service tests.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

use khair_domain::error::{AlreadyExistsError, KhairError, NotFoundError};
use khair_domain::id::{OrganizationId, ServiceId};
use khair_domain::organization::Organization;
use khair_domain::service::Service;

use crate::ports::{OrganizationRepository, ServiceCatalog};

#[derive(Default)]
struct Inner {
    services: BTreeMap<ServiceId, Service>,
    organizations: BTreeMap<OrganizationId, Organization>,
    links: BTreeSet<(OrganizationId, ServiceId)>,
}

impl Inner {
    fn hydrate(&self, organization: &Organization) -> Organization {
        let mut organization = organization.clone();
        let services: Vec<Service> = self
            .links
            .iter()
            .filter(|(org, _)| *org == organization.id)
            .filter_map(|(_, service)| self.services.get(service).cloned())
            .collect();
        organization.set_services(services);
        organization
    }
}

/// Catalog and directory in one store so associations can be resolved.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// A store whose catalog holds `1 Bed`, `2 Food` and `3 Clothing`.
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for service in [
                Service::new("1", "Bed"),
                Service::new("2", "Food"),
                Service::new("3", "Clothing"),
            ] {
                inner.services.insert(service.id.clone(), service);
            }
        }
        store
    }

    /// Number of association rows, for cascade checks.
    pub fn link_count(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }
}

impl ServiceCatalog for InMemoryStore {
    fn seed(&self, services: Vec<Service>) -> impl Future<Output = Result<usize, KhairError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let mut inserted = 0_usize;
        for service in services {
            if !inner.services.contains_key(&service.id) {
                inner.services.insert(service.id.clone(), service);
                inserted += 1;
            }
        }
        async move { Ok(inserted) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, KhairError>> + Send {
        let inner = self.inner.lock().unwrap();
        let result: Vec<Service> = inner.services.values().cloned().collect();
        async move { Ok(result) }
    }

    fn get_by_ids(
        &self,
        ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<Vec<Service>, KhairError>> + Send {
        let inner = self.inner.lock().unwrap();
        let result: Vec<Service> = ids
            .iter()
            .filter_map(|id| inner.services.get(id).cloned())
            .collect();
        async move { Ok(result) }
    }
}

impl OrganizationRepository for InMemoryStore {
    fn create(
        &self,
        organization: Organization,
    ) -> impl Future<Output = Result<Organization, KhairError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result: Result<Organization, KhairError> =
            if inner.organizations.contains_key(&organization.id) {
                Err(AlreadyExistsError {
                    entity: "Organization",
                    id: organization.id.to_string(),
                }
                .into())
            } else {
                let mut stored = organization;
                stored.services.clear();
                inner.organizations.insert(stored.id.clone(), stored.clone());
                Ok(stored)
            };
        async move { result }
    }

    fn get_by_id(
        &self,
        id: &OrganizationId,
    ) -> impl Future<Output = Result<Option<Organization>, KhairError>> + Send {
        let inner = self.inner.lock().unwrap();
        let result = inner.organizations.get(id).map(|org| inner.hydrate(org));
        async move { Ok(result) }
    }

    fn delete(&self, id: &OrganizationId) -> impl Future<Output = Result<bool, KhairError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let removed = inner.organizations.remove(id).is_some();
        inner.links.retain(|(org, _)| org != id);
        async move { Ok(removed) }
    }

    fn attach_services(
        &self,
        id: &OrganizationId,
        service_ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<(), KhairError>> + Send {
        let mut inner = self.inner.lock().unwrap();
        let result: Result<(), KhairError> = if inner.organizations.contains_key(id) {
            for service_id in service_ids {
                inner.links.insert((id.clone(), service_id.clone()));
            }
            Ok(())
        } else {
            Err(NotFoundError {
                entity: "Organization",
                id: id.to_string(),
            }
            .into())
        };
        async move { result }
    }

    fn find_by_services(
        &self,
        service_ids: &BTreeSet<ServiceId>,
    ) -> impl Future<Output = Result<Vec<Organization>, KhairError>> + Send {
        let inner = self.inner.lock().unwrap();
        let result: Vec<Organization> = inner
            .organizations
            .values()
            .map(|org| inner.hydrate(org))
            .filter(|org| org.offers_all(service_ids))
            .collect();
        async move { Ok(result) }
    }
}
