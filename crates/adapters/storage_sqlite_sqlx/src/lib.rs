//! # khair-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `khair-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `khair-app` (for port traits) and `khair-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod organization_repo;
pub mod pool;
pub mod service_repo;

pub use error::StorageError;
pub use organization_repo::SqliteOrganizationRepository;
pub use pool::{Config, Database};
pub use service_repo::SqliteServiceCatalog;
