//! Catalog service — use-cases for the fixed service catalog.

use std::collections::{BTreeMap, BTreeSet};

use khair_domain::error::{KhairError, NotFoundError};
use khair_domain::id::ServiceId;
use khair_domain::service::{Service, id_set, missing_ids};

use crate::ports::ServiceCatalog;

/// Services found for a request, plus the ids nobody knew.
pub(crate) struct Lookup {
    pub found: Vec<Service>,
    pub missing: Vec<ServiceId>,
}

/// Application service for the service catalog.
pub struct CatalogService<C> {
    catalog: C,
}

impl<C: ServiceCatalog> CatalogService<C> {
    /// Create a new service backed by the given catalog.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Load the predefined services at process start.
    ///
    /// Every entry is validated first; when the list repeats an id, the
    /// first entry wins. Ids already present in the store are kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::ConstraintViolation`] for a blank id or name,
    /// or a storage error from the catalog.
    #[tracing::instrument(skip_all, fields(count = services.len()))]
    pub async fn seed(&self, services: Vec<Service>) -> Result<usize, KhairError> {
        let mut unique: BTreeMap<ServiceId, Service> = BTreeMap::new();
        for service in services {
            service.validate()?;
            if unique.contains_key(&service.id) {
                tracing::warn!(service_id = %service.id, "duplicate id in catalog seed, keeping first");
                continue;
            }
            unique.insert(service.id.clone(), service);
        }

        let inserted = self.catalog.seed(unique.into_values().collect()).await?;
        tracing::info!(inserted, "service catalog seeded");
        Ok(inserted)
    }

    /// List every service in the catalog.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the catalog.
    pub async fn list_services(&self) -> Result<Vec<Service>, KhairError> {
        self.catalog.get_all().await
    }

    /// Resolve requested ids to full service records.
    ///
    /// The input is treated as a set: duplicates collapse and the result
    /// holds one record per distinct id, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::NotFound`] listing every unknown id, or a
    /// storage error from the catalog.
    #[tracing::instrument(skip_all)]
    pub async fn validate_service_ids<I>(&self, ids: I) -> Result<Vec<Service>, KhairError>
    where
        I: IntoIterator<Item = ServiceId>,
    {
        let Lookup { found, missing } = self.lookup(&id_set(ids)).await?;
        if !missing.is_empty() {
            return Err(NotFoundError::services(&missing).into());
        }
        Ok(found)
    }

    pub(crate) async fn lookup(&self, ids: &BTreeSet<ServiceId>) -> Result<Lookup, KhairError> {
        if ids.is_empty() {
            return Ok(Lookup {
                found: Vec::new(),
                missing: Vec::new(),
            });
        }
        let found = self.catalog.get_by_ids(ids).await?;
        let missing = missing_ids(ids, &found);
        Ok(Lookup { found, missing })
    }
}
