//! Organization — a provider that sits at a location and offers a subset of
//! the service catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConstraintViolation;
use crate::geo::Location;
use crate::id::{OrganizationId, ServiceId};
use crate::service::Service;

/// An organization registered in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub phone: String,
    pub location: Location,
    /// Attached services, ordered by id without duplicates.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Organization {
    /// Create a builder for constructing an [`Organization`].
    #[must_use]
    pub fn builder() -> OrganizationBuilder {
        OrganizationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintViolation`] when the id or name is blank or the
    /// location is outside the valid coordinate ranges.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        self.id.validate()?;
        if self.name.trim().is_empty() {
            return Err(ConstraintViolation::EmptyName);
        }
        self.location.validate()
    }

    /// Whether the attached services cover every id in `requested`.
    ///
    /// An empty request is trivially covered.
    #[must_use]
    pub fn offers_all(&self, requested: &BTreeSet<ServiceId>) -> bool {
        let offered: BTreeSet<&ServiceId> = self.services.iter().map(|s| &s.id).collect();
        requested.iter().all(|id| offered.contains(id))
    }

    /// Replace the attached services, keeping them sorted and unique.
    pub fn set_services(&mut self, services: impl IntoIterator<Item = Service>) {
        let mut services: Vec<Service> = services.into_iter().collect();
        services.sort_by(|a, b| a.id.cmp(&b.id));
        services.dedup_by(|a, b| a.id == b.id);
        self.services = services;
    }
}

/// Step-by-step builder for [`Organization`].
#[derive(Debug, Default)]
pub struct OrganizationBuilder {
    id: Option<OrganizationId>,
    name: Option<String>,
    phone: Option<String>,
    location: Option<Location>,
    services: Vec<Service>,
}

impl OrganizationBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<OrganizationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn coordinates(self, latitude: f64, longitude: f64) -> Self {
        self.location(Location::new(latitude, longitude))
    }

    #[must_use]
    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Consume the builder, validate, and return an [`Organization`].
    ///
    /// A missing id is replaced by a freshly generated one; a missing
    /// location defaults to `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintViolation`] if any invariant fails.
    pub fn build(self) -> Result<Organization, ConstraintViolation> {
        let mut organization = Organization {
            id: self.id.unwrap_or_else(OrganizationId::generate),
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            location: self.location.unwrap_or(Location::new(0.0, 0.0)),
            services: Vec::new(),
        };
        organization.set_services(self.services);
        organization.validate()?;
        Ok(organization)
    }
}
