//! # khair-domain
//!
//! Pure domain model for the khair organization directory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Services** (the fixed catalog organizations pick from)
//! - Define **Organizations** (providers with a location and a service set)
//! - Define **Locations** and great-circle distance
//! - Select the nearest organization among matching candidates
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod geo;
pub mod matching;
pub mod organization;
pub mod service;
