//! `SQLite` implementation of [`OrganizationRepository`].

use std::collections::BTreeSet;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use khair_app::ports::OrganizationRepository;
use khair_domain::error::{AlreadyExistsError, KhairError, NotFoundError};
use khair_domain::geo::Location;
use khair_domain::id::{OrganizationId, ServiceId};
use khair_domain::organization::Organization;
use khair_domain::service::Service;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Organization`].
///
/// Services are not part of the row and are loaded separately.
struct Wrapper(Organization);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let phone: String = row.try_get("phone")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;

        Ok(Self(Organization {
            id: OrganizationId::from(id),
            name,
            phone,
            location: Location::new(latitude, longitude),
            services: Vec::new(),
        }))
    }
}

/// Wrapper for a service row attached to a single organization.
struct Attached(Service);

impl<'r> FromRow<'r, SqliteRow> for Attached {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Service {
            id: ServiceId::from(id),
            name,
        }))
    }
}

/// An organization row joined with one of its services.
struct Offering {
    organization: Organization,
    service: Service,
}

impl<'r> FromRow<'r, SqliteRow> for Offering {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let Wrapper(organization) = Wrapper::from_row(row)?;
        let service_id: String = row.try_get("service_id")?;
        let service_name: String = row.try_get("service_name")?;

        Ok(Self {
            organization,
            service: Service {
                id: ServiceId::from(service_id),
                name: service_name,
            },
        })
    }
}

const INSERT: &str =
    "INSERT INTO organizations (id, name, phone, latitude, longitude) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str =
    "SELECT id, name, phone, latitude, longitude FROM organizations WHERE id = ?";
const DELETE: &str = "DELETE FROM organizations WHERE id = ?";
const SELECT_SERVICES_OF: &str = "SELECT s.id, s.name FROM organization_services os \
     JOIN services s ON s.id = os.service_id WHERE os.organization_id = ? ORDER BY s.id";
const LINK_IF_ABSENT: &str = "INSERT INTO organization_services (organization_id, service_id) \
     VALUES (?, ?) ON CONFLICT (organization_id, service_id) DO NOTHING";

/// `SQLite`-backed organization directory.
pub struct SqliteOrganizationRepository {
    pool: SqlitePool,
}

impl SqliteOrganizationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Fold rows ordered by organization id into one [`Organization`] per id.
fn group_offerings(rows: Vec<Offering>) -> Vec<Organization> {
    let mut organizations: Vec<Organization> = Vec::new();
    for Offering {
        organization,
        service,
    } in rows
    {
        match organizations.last_mut() {
            Some(last) if last.id == organization.id => last.services.push(service),
            _ => {
                let mut organization = organization;
                organization.services.push(service);
                organizations.push(organization);
            }
        }
    }
    organizations
}

impl OrganizationRepository for SqliteOrganizationRepository {
    async fn create(&self, mut organization: Organization) -> Result<Organization, KhairError> {
        let result = sqlx::query(INSERT)
            .bind(organization.id.as_str())
            .bind(&organization.name)
            .bind(&organization.phone)
            .bind(organization.location.latitude)
            .bind(organization.location.longitude)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                organization.services.clear();
                Ok(organization)
            }
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(AlreadyExistsError {
                    entity: "Organization",
                    id: organization.id.to_string(),
                }
                .into())
            }
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    async fn get_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, KhairError> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;

        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(StorageError::from)?;

        let Some(Wrapper(mut organization)) = row else {
            return Ok(None);
        };

        let services: Vec<Attached> = sqlx::query_as(SELECT_SERVICES_OF)
            .bind(id.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(StorageError::from)?;
        organization.set_services(services.into_iter().map(|a| a.0));
        Ok(Some(organization))
    }

    async fn delete(&self, id: &OrganizationId) -> Result<bool, KhairError> {
        let result = sqlx::query(DELETE)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn attach_services(
        &self,
        id: &OrganizationId,
        service_ids: &BTreeSet<ServiceId>,
    ) -> Result<(), KhairError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        for service_id in service_ids {
            let result = sqlx::query(LINK_IF_ABSENT)
                .bind(id.as_str())
                .bind(service_id.as_str())
                .execute(&mut *tx)
                .await;

            match result {
                Ok(_) => {}
                // The organization vanished, or a service id slipped past validation.
                Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
                    return Err(NotFoundError {
                        entity: "Organization or service",
                        id: format!("{id}/{service_id}"),
                    }
                    .into());
                }
                Err(err) => return Err(StorageError::from(err).into()),
            }
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn find_by_services(
        &self,
        service_ids: &BTreeSet<ServiceId>,
    ) -> Result<Vec<Organization>, KhairError> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Only the requested ids are bound, however many organizations match.
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT o.id, o.name, o.phone, o.latitude, o.longitude, \
             s.id AS service_id, s.name AS service_name \
             FROM organizations o \
             JOIN organization_services os ON os.organization_id = o.id \
             JOIN services s ON s.id = os.service_id \
             WHERE o.id IN (SELECT organization_id FROM organization_services \
             WHERE service_id IN (",
        );
        let mut separated = query.separated(", ");
        for service_id in service_ids {
            separated.push_bind(service_id.as_str());
        }
        separated.push_unseparated(")) ORDER BY o.id, s.id");

        let rows: Vec<Offering> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let mut candidates = group_offerings(rows);
        candidates.retain(|organization| organization.offers_all(service_ids));
        tracing::debug!(matches = candidates.len(), "organizations offering all services");
        Ok(candidates)
    }
}
