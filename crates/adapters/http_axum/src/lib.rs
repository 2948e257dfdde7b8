//! # khair-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API for organizations (`/orgs`, `/orgs/{org_id}`,
//!   `/orgs/{org_id}/services`) and the catalog (`/services`,
//!   `/services/nearest`)
//! - Run every API route behind an [`AccessPolicy`](khair_app::ports::AccessPolicy)
//!   check fed from the `Authorization: Bearer <key>` header
//! - Refuse request bodies not declared as `application/json`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `khair-app` (for port traits and services) and `khair-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod content_type;
pub mod error;
pub mod router;
pub mod state;

pub use router::build;
pub use state::AppState;
