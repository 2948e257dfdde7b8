//! JSON REST handlers for organizations and their attached services.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use khair_app::ports::{OrganizationRepository, ServiceCatalog};
use khair_domain::geo::Location;
use khair_domain::id::{OrganizationId, ServiceId};
use khair_domain::organization::Organization;
use khair_domain::service::Service;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an organization.
#[derive(Deserialize)]
pub struct CreateOrganizationRequest {
    /// Generated when omitted.
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub location: Location,
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Organization>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Organization>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the service attachment endpoints.
pub enum ServicesResponse {
    Ok(Json<Vec<Service>>),
}

impl IntoResponse for ServicesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /orgs`
pub async fn create<R, C>(
    State(state): State<AppState<R, C>>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    let mut builder = Organization::builder()
        .name(req.name)
        .phone(req.phone)
        .location(req.location);
    if let Some(id) = req.id {
        builder = builder.id(id);
    }

    let organization = builder.build()?;
    let created = state
        .organization_service
        .create_organization(organization)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /orgs/{org_id}`
pub async fn get<R, C>(
    State(state): State<AppState<R, C>>,
    Path(org_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    let organization = state
        .organization_service
        .get_organization(&OrganizationId::from(org_id))
        .await?;
    Ok(GetResponse::Ok(Json(organization)))
}

/// `DELETE /orgs/{org_id}`
pub async fn delete<R, C>(
    State(state): State<AppState<R, C>>,
    Path(org_id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    state
        .organization_service
        .delete_organization(&OrganizationId::from(org_id))
        .await?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /orgs/{org_id}/services`
///
/// The body is a JSON array of service ids.
pub async fn attach_services<R, C>(
    State(state): State<AppState<R, C>>,
    Path(org_id): Path<String>,
    Json(service_ids): Json<Vec<ServiceId>>,
) -> Result<ServicesResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    let attached = state
        .organization_service
        .attach_services(&OrganizationId::from(org_id), service_ids)
        .await?;
    Ok(ServicesResponse::Ok(Json(attached)))
}

/// `GET /orgs/{org_id}/services`
pub async fn list_services<R, C>(
    State(state): State<AppState<R, C>>,
    Path(org_id): Path<String>,
) -> Result<ServicesResponse, ApiError>
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
{
    let services = state
        .organization_service
        .services_of(&OrganizationId::from(org_id))
        .await?;
    Ok(ServicesResponse::Ok(Json(services)))
}
