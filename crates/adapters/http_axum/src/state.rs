//! Shared application state for axum handlers.

use std::sync::Arc;

use khair_app::ports::{OrganizationRepository, ServiceCatalog};
use khair_app::services::catalog_service::CatalogService;
use khair_app::services::nearest_service::NearestService;
use khair_app::services::organization_service::OrganizationService;

/// Application state shared across all axum handlers.
///
/// Generic over the directory and catalog types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<R, C> {
    /// Catalog listing and seeding.
    pub catalog_service: Arc<CatalogService<C>>,
    /// Organization CRUD and service attachment.
    pub organization_service: Arc<OrganizationService<R, C>>,
    /// Nearest-match resolution.
    pub nearest_service: Arc<NearestService<R, C>>,
}

impl<R, C> Clone for AppState<R, C> {
    fn clone(&self) -> Self {
        Self {
            catalog_service: Arc::clone(&self.catalog_service),
            organization_service: Arc::clone(&self.organization_service),
            nearest_service: Arc::clone(&self.nearest_service),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: OrganizationRepository + Clone + Send + Sync + 'static,
    C: ServiceCatalog + Clone + Send + Sync + 'static,
{
    /// Wire every use-case onto the same directory and catalog.
    ///
    /// `R` and `C` are cloned into each service, so pass cheap handles
    /// such as `Arc`s.
    pub fn new(directory: R, catalog: C) -> Self {
        Self {
            catalog_service: Arc::new(CatalogService::new(catalog.clone())),
            organization_service: Arc::new(OrganizationService::new(
                directory.clone(),
                catalog.clone(),
            )),
            nearest_service: Arc::new(NearestService::new(directory, catalog)),
        }
    }
}
