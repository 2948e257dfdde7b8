//! Nearest service — resolve the closest organization offering a service set.

use khair_domain::error::{InvalidServicesError, KhairError, NoMatchError};
use khair_domain::geo::Location;
use khair_domain::id::ServiceId;
use khair_domain::matching::{NearestMatch, closest};
use khair_domain::service::id_set;

use crate::ports::{OrganizationRepository, ServiceCatalog};
use crate::services::catalog_service::{CatalogService, Lookup};

/// Read-only use-case combining the catalog and the directory.
///
/// Every call re-queries the store; nothing is cached between requests.
pub struct NearestService<R, C> {
    directory: R,
    catalog: CatalogService<C>,
}

impl<R, C> NearestService<R, C>
where
    R: OrganizationRepository,
    C: ServiceCatalog,
{
    /// Create a new service backed by the given directory and catalog.
    pub fn new(directory: R, catalog: C) -> Self {
        Self {
            directory,
            catalog: CatalogService::new(catalog),
        }
    }

    /// Find the organization closest to `origin` among those offering every
    /// requested service.
    ///
    /// Candidates are scanned in ascending organization id; on an exact
    /// distance tie the first one wins. The returned organization carries
    /// the resolved records of the requested services.
    ///
    /// # Errors
    ///
    /// Returns [`KhairError::ConstraintViolation`] for an invalid `origin`,
    /// [`KhairError::InvalidServices`] when the request is empty or names
    /// unknown services, [`KhairError::NoMatch`] when no organization offers
    /// them all, or a storage error.
    #[tracing::instrument(skip(self, service_ids), fields(lat = origin.latitude, lon = origin.longitude))]
    pub async fn find_nearest(
        &self,
        service_ids: Vec<ServiceId>,
        origin: Location,
    ) -> Result<NearestMatch, KhairError> {
        origin.validate()?;

        let requested = id_set(service_ids);
        if requested.is_empty() {
            return Err(InvalidServicesError::Empty.into());
        }

        let Lookup { found, missing } = self.catalog.lookup(&requested).await?;
        if !missing.is_empty() {
            return Err(InvalidServicesError::Unknown(missing).into());
        }

        let candidates = self.directory.find_by_services(&requested).await?;
        tracing::debug!(candidates = candidates.len(), "candidates offering all services");

        let mut nearest = closest(&origin, candidates).ok_or_else(|| NoMatchError {
            requested: requested.into_iter().collect(),
        })?;
        nearest.organization.set_services(found);

        tracing::info!(
            organization_id = %nearest.organization.id,
            distance_km = nearest.distance_km,
            "nearest organization resolved"
        );
        Ok(nearest)
    }
}
