//! `SQLite` implementation of [`ServiceCatalog`].

use std::collections::BTreeSet;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use khair_app::ports::ServiceCatalog;
use khair_domain::error::KhairError;
use khair_domain::id::ServiceId;
use khair_domain::service::Service;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Service`].
pub(crate) struct Wrapper(pub(crate) Service);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Service {
            id: ServiceId::from(id),
            name,
        }))
    }
}

const INSERT_IF_ABSENT: &str =
    "INSERT INTO services (id, name) VALUES (?, ?) ON CONFLICT (id) DO NOTHING";
const SELECT_ALL: &str = "SELECT id, name FROM services ORDER BY id";

/// `SQLite`-backed service catalog.
pub struct SqliteServiceCatalog {
    pool: SqlitePool,
}

impl SqliteServiceCatalog {
    /// Create a new catalog using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceCatalog for SqliteServiceCatalog {
    async fn seed(&self, services: Vec<Service>) -> Result<usize, KhairError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let mut inserted = 0;
        for service in &services {
            let result = sqlx::query(INSERT_IF_ABSENT)
                .bind(service.id.as_str())
                .bind(&service.name)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            if result.rows_affected() > 0 {
                inserted += 1;
            }
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(inserted)
    }

    async fn get_all(&self) -> Result<Vec<Service>, KhairError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_by_ids(&self, ids: &BTreeSet<ServiceId>) -> Result<Vec<Service>, KhairError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name FROM services WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(") ORDER BY id");

        let rows: Vec<Wrapper> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
