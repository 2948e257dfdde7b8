//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod organizations;
#[allow(clippy::missing_errors_doc)]
pub mod services;

use axum::Router;
use axum::routing::{get, post};

use khair_app::ports::{OrganizationRepository, ServiceCatalog};

use crate::state::AppState;

/// Build the API sub-router.
pub fn routes<R, C>() -> Router<AppState<R, C>>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    Router::new()
        // Organizations
        .route("/orgs", post(organizations::create::<R, C>))
        .route(
            "/orgs/{org_id}",
            get(organizations::get::<R, C>).delete(organizations::delete::<R, C>),
        )
        .route(
            "/orgs/{org_id}/services",
            get(organizations::list_services::<R, C>)
                .post(organizations::attach_services::<R, C>),
        )
        // Catalog
        .route("/services", get(services::list::<R, C>))
        .route(
            "/services/nearest",
            get(services::nearest::<R, C>).post(services::nearest::<R, C>),
        )
}
