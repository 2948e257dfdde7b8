//! Nearest-match selection over a candidate list.

use serde::{Deserialize, Serialize};

use crate::geo::Location;
use crate::organization::Organization;

/// The winning organization of a nearest-match query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestMatch {
    #[serde(flatten)]
    pub organization: Organization,
    /// Great-circle distance from the query point, in kilometres.
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

/// Pick the candidate closest to `origin`.
///
/// Only a strictly smaller distance replaces the current best, so on ties
/// the earliest candidate wins. Returns `None` for an empty iterator.
#[must_use]
pub fn closest<I>(origin: &Location, candidates: I) -> Option<NearestMatch>
where
    I: IntoIterator<Item = Organization>,
{
    let mut best: Option<NearestMatch> = None;
    for organization in candidates {
        let distance_km = origin.distance_to(&organization.location);
        if best.as_ref().is_none_or(|b| distance_km < b.distance_km) {
            best = Some(NearestMatch {
                organization,
                distance_km,
            });
        }
    }
    best
}
