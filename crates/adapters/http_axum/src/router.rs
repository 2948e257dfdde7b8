//! Axum router assembly.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use khair_app::ports::{AccessPolicy, OrganizationRepository, ServiceCatalog};

use crate::auth::require_access;
use crate::content_type::require_json;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Every API route runs behind the `access` check, then refuses non-JSON
/// bodies; `/health` stays open.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, C, P>(state: AppState<R, C>, access: P) -> Router
where
    R: OrganizationRepository + Send + Sync + 'static,
    C: ServiceCatalog + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
{
    let api = crate::api::routes::<R, C>()
        .route_layer(middleware::from_fn(require_json))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(access),
            require_access::<P>,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use khair_app::ports::{AllowAll, StaticKeys};
    use khair_domain::error::{AlreadyExistsError, KhairError};
    use khair_domain::id::{OrganizationId, ServiceId};
    use khair_domain::organization::Organization;
    use khair_domain::service::Service;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[derive(Clone)]
    struct StubCatalog;

    #[derive(Clone)]
    struct StubDirectory;

    fn catalog() -> Vec<Service> {
        vec![Service::new("1", "Bed"), Service::new("2", "Food")]
    }

    /// The only stored organization: ~5 km east of (0, 0), offering beds.
    fn shelter() -> Organization {
        Organization::builder()
            .id("org1")
            .name("Shelter")
            .phone("555-0100")
            .coordinates(0.0, 0.045)
            .service(Service::new("1", "Bed"))
            .build()
            .unwrap()
    }

    impl ServiceCatalog for StubCatalog {
        async fn seed(&self, services: Vec<Service>) -> Result<usize, KhairError> {
            Ok(services.len())
        }
        async fn get_all(&self) -> Result<Vec<Service>, KhairError> {
            Ok(catalog())
        }
        async fn get_by_ids(&self, ids: &BTreeSet<ServiceId>) -> Result<Vec<Service>, KhairError> {
            Ok(catalog().into_iter().filter(|s| ids.contains(&s.id)).collect())
        }
    }

    impl OrganizationRepository for StubDirectory {
        async fn create(&self, organization: Organization) -> Result<Organization, KhairError> {
            if organization.id.as_str() == "org1" {
                return Err(AlreadyExistsError {
                    entity: "Organization",
                    id: organization.id.to_string(),
                }
                .into());
            }
            Ok(organization)
        }
        async fn get_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, KhairError> {
            Ok((id.as_str() == "org1").then(shelter))
        }
        async fn delete(&self, id: &OrganizationId) -> Result<bool, KhairError> {
            Ok(id.as_str() == "org1")
        }
        async fn attach_services(
            &self,
            _id: &OrganizationId,
            _service_ids: &BTreeSet<ServiceId>,
        ) -> Result<(), KhairError> {
            Ok(())
        }
        async fn find_by_services(
            &self,
            service_ids: &BTreeSet<ServiceId>,
        ) -> Result<Vec<Organization>, KhairError> {
            let org = shelter();
            Ok(if org.offers_all(service_ids) {
                vec![org]
            } else {
                Vec::new()
            })
        }
    }

    fn state() -> AppState<StubDirectory, StubCatalog> {
        AppState::new(StubDirectory, StubCatalog)
    }

    fn open_app() -> Router {
        build(state(), AllowAll)
    }

    fn locked_app() -> Router {
        build(state(), StaticKeys::new(["s3cret"]))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let body = body.map_or_else(Body::empty, |value| Body::from(value.to_string()));
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = send(locked_app(), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_unauthorized_when_key_missing() {
        let response = send(locked_app(), "GET", "/services", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "an API key is required" })
        );
    }

    #[tokio::test]
    async fn should_pass_through_when_key_accepted() {
        let response = locked_app()
            .oneshot(
                Request::builder()
                    .uri("/services")
                    .header(AUTHORIZATION, "Bearer s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!([{ "id": "1", "name": "Bed" }, { "id": "2", "name": "Food" }])
        );
    }

    #[tokio::test]
    async fn should_return_created_when_organization_valid() {
        let response = send(
            open_app(),
            "POST",
            "/orgs",
            Some(json!({
                "id": "org2",
                "name": "Kitchen",
                "phone": "555-0101",
                "location": { "latitude": 1.5, "longitude": 2.5 }
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["id"], "org2");
        assert_eq!(body["services"], json!([]));
    }

    #[tokio::test]
    async fn should_generate_id_when_create_omits_it() {
        let response = send(
            open_app(),
            "POST",
            "/orgs",
            Some(json!({ "name": "Kitchen", "location": { "latitude": 0.0, "longitude": 0.0 } })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert!(!body["id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_conflict_when_id_taken() {
        let response = send(
            open_app(),
            "POST",
            "/orgs",
            Some(json!({
                "id": "org1",
                "name": "Again",
                "location": { "latitude": 0.0, "longitude": 0.0 }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_coordinates_out_of_range() {
        let response = send(
            open_app(),
            "POST",
            "/orgs",
            Some(json!({
                "name": "Nowhere",
                "location": { "latitude": 100.0, "longitude": 0.0 }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_with_message_when_organization_missing() {
        let response = send(open_app(), "GET", "/orgs/ghost", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Organization not found: ghost" })
        );
    }

    #[tokio::test]
    async fn should_return_no_content_when_organization_deleted() {
        let response = send(open_app(), "DELETE", "/orgs/org1", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn should_return_resolved_services_when_attached() {
        let response = send(open_app(), "POST", "/orgs/org1/services", Some(json!(["2", "1"]))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!([{ "id": "1", "name": "Bed" }, { "id": "2", "name": "Food" }])
        );
    }

    #[tokio::test]
    async fn should_return_not_found_when_attaching_unknown_service() {
        let response = send(open_app(), "POST", "/orgs/org1/services", Some(json!(["9"]))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_nearest_organization_with_distance() {
        for method in ["GET", "POST"] {
            let response = send(
                open_app(),
                method,
                "/services/nearest",
                Some(json!({ "services": ["1"], "latitude": 0.0, "longitude": 0.0 })),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK, "{method}");
            let body = json_body(response).await;
            assert_eq!(body["id"], "org1");
            assert_eq!(body["services"], json!([{ "id": "1", "name": "Bed" }]));
            let distance = body["distance"].as_f64().unwrap();
            assert!((distance - 5.0).abs() < 0.01, "got {distance}");
        }
    }

    #[tokio::test]
    async fn should_return_bad_request_when_nearest_names_unknown_service() {
        let response = send(
            open_app(),
            "POST",
            "/services/nearest",
            Some(json!({ "services": ["1", "9"], "latitude": 0.0, "longitude": 0.0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "unknown services: 9" })
        );
    }

    #[tokio::test]
    async fn should_return_not_found_when_nobody_offers_all_services() {
        let response = send(
            open_app(),
            "POST",
            "/services/nearest",
            Some(json!({ "services": ["1", "2"], "latitude": 0.0, "longitude": 0.0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_malformed_json() {
        let response = open_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/services/nearest")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    async fn send_raw(
        app: Router,
        method: &str,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn should_return_unsupported_media_type_when_body_not_json() {
        let body = r#"{"name":"Kitchen","location":{"latitude":0.0,"longitude":0.0}}"#;
        let response = send_raw(open_app(), "POST", "/orgs", "text/plain", body).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "expected Content-Type: application/json" })
        );

        // Routes that ignore the body still refuse a non-JSON one.
        let response = send_raw(open_app(), "GET", "/orgs/org1", "text/plain", "hello").await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn should_accept_json_body_with_charset() {
        let body = r#"{"services":["1"],"latitude":0.0,"longitude":0.0}"#;
        let response = send_raw(
            open_app(),
            "POST",
            "/services/nearest",
            "application/json; charset=utf-8",
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_check_access_before_content_type() {
        let response = send_raw(locked_app(), "POST", "/orgs", "text/plain", "hello").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
