//! # khair-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ServiceCatalog` — seed, list and look up catalog services
//!   - `OrganizationRepository` — CRUD, service attachment, set filtering
//!   - `AccessPolicy` — capability check run before any use-case
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CatalogService` — seed, list, validate requested service ids
//!   - `OrganizationService` — create, get, delete, attach, filter
//!   - `NearestService` — find the closest organization offering a service set
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `khair-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
