//! JSON REST handlers for the service catalog and nearest-match lookup.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use khair_app::ports::{OrganizationRepository, ServiceCatalog};
use khair_domain::geo::Location;
use khair_domain::id::ServiceId;
use khair_domain::matching::NearestMatch;
use khair_domain::service::Service;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the nearest-match lookup.
#[derive(Deserialize)]
pub struct NearestRequest {
    pub services: Vec<ServiceId>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Service>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the nearest endpoint.
pub enum NearestResponse {
    Ok(Json<NearestMatch>),
}

impl IntoResponse for NearestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /services`
pub async fn list<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<ListResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    let services = state.catalog_service.list_services().await?;
    Ok(ListResponse::Ok(Json(services)))
}

/// `GET /services/nearest` and `POST /services/nearest`
///
/// Both methods read the query from a JSON body.
pub async fn nearest<R, C>(
    State(state): State<AppState<R, C>>,
    Json(req): Json<NearestRequest>,
) -> Result<NearestResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    let origin = Location::new(req.latitude, req.longitude);
    let found = state
        .nearest_service
        .find_nearest(req.services, origin)
        .await?;
    Ok(NearestResponse::Ok(Json(found)))
}
