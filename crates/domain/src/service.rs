//! Service — one entry of the fixed catalog an organization can offer
//! (shelter beds, food, …).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConstraintViolation;
use crate::id::ServiceId;

/// A named service from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
}

impl Service {
    #[must_use]
    pub fn new(id: impl Into<ServiceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::EmptyId`] or
    /// [`ConstraintViolation::EmptyName`].
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        self.id.validate()?;
        if self.name.trim().is_empty() {
            return Err(ConstraintViolation::EmptyName);
        }
        Ok(())
    }
}

/// Collapse a requested id list into a set.
///
/// Duplicates are dropped and the result is ordered by id.
#[must_use]
pub fn id_set<I>(ids: I) -> BTreeSet<ServiceId>
where
    I: IntoIterator<Item = ServiceId>,
{
    ids.into_iter().collect()
}

/// Ids from `requested` that are missing from `found`, in id order.
#[must_use]
pub fn missing_ids(requested: &BTreeSet<ServiceId>, found: &[Service]) -> Vec<ServiceId> {
    let known: BTreeSet<&ServiceId> = found.iter().map(|s| &s.id).collect();
    requested
        .iter()
        .filter(|id| !known.contains(id))
        .cloned()
        .collect()
}
