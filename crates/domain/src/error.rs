//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`KhairError`]
//! via `#[from]`. Adapters box their failures into [`KhairError::Storage`].

use crate::id::ServiceId;

/// Top-level error for every use-case in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum KhairError {
    /// A domain invariant was violated (bad coordinates, empty name, …).
    #[error("constraint violation: {0}")]
    ConstraintViolation(#[from] ConstraintViolation),

    /// An item with the same identifier already exists.
    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    /// A referenced item does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A nearest-match request named services outside the catalog.
    #[error(transparent)]
    InvalidServices(#[from] InvalidServicesError),

    /// No organization offers every requested service.
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),

    /// The backing store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected before anything reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("identifier must not be empty")]
    EmptyId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("at least one service id is required")]
    EmptyServiceSet,
}

/// Raised when a lookup by identifier finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    /// Build a `NotFound` for one or more missing services.
    #[must_use]
    pub fn services(missing: &[ServiceId]) -> Self {
        Self {
            entity: "Service",
            id: join_ids(missing),
        }
    }
}

/// Raised when creating an item whose identifier is already taken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} already exists: {id}")]
pub struct AlreadyExistsError {
    pub entity: &'static str,
    pub id: String,
}

/// Why a requested service set cannot be matched against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidServicesError {
    #[error("no services requested")]
    Empty,
    #[error("unknown services: {}", join_ids(.0))]
    Unknown(Vec<ServiceId>),
}

/// No organization offers the full requested service set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no organization offers all of: {}", join_ids(.requested))]
pub struct NoMatchError {
    pub requested: Vec<ServiceId>,
}

fn join_ids(ids: &[ServiceId]) -> String {
    ids.iter()
        .map(ServiceId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
