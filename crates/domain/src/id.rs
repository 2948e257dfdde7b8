//! Typed identifier newtypes backed by strings.
//!
//! Identifiers are chosen by callers (catalog seed lists, organization
//! payloads), so they wrap free-form text rather than UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConstraintViolation;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check that the identifier is usable as a key.
            ///
            /// # Errors
            ///
            /// Returns [`ConstraintViolation::EmptyId`] for blank identifiers.
            pub fn validate(&self) -> Result<(), ConstraintViolation> {
                if self.0.trim().is_empty() {
                    return Err(ConstraintViolation::EmptyId);
                }
                Ok(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Service`](crate::service::Service) in the catalog.
    ServiceId
);

define_id!(
    /// Unique identifier for an [`Organization`](crate::organization::Organization).
    OrganizationId
);

impl OrganizationId {
    /// Generate a fresh random identifier for organizations created without one.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
