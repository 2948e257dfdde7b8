//! Geographic points and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::ConstraintViolation;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on Earth expressed in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both coordinates are finite and inside their ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintViolation`] naming the offending coordinate.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(ConstraintViolation::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConstraintViolation::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConstraintViolation::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Great-circle distance to `other`, in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &Location) -> f64 {
        distance_km(self, other)
    }
}

/// Haversine great-circle distance between two points, in kilometres.
///
/// Inputs are not normalized; callers are expected to pass coordinates that
/// passed [`Location::validate`].
#[must_use]
pub fn distance_km(from: &Location, to: &Location) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` marginally past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-6;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn should_return_zero_for_identical_points() {
        for p in [
            Location::new(0.0, 0.0),
            Location::new(45.5, -73.6),
            Location::new(-90.0, 180.0),
        ] {
            assert!(distance_km(&p, &p).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn should_be_symmetric() {
        let montreal = Location::new(45.5017, -73.5673);
        let paris = Location::new(48.8566, 2.3522);
        let there = distance_km(&montreal, &paris);
        let back = distance_km(&paris, &montreal);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn should_match_quarter_meridian_reference() {
        let d = distance_km(&Location::new(0.0, 0.0), &Location::new(0.0, 90.0));
        assert_close(d, EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2);
        assert!((d - 10_007.5).abs() < 0.1);
    }

    #[test]
    fn should_match_half_circumference_for_antipodes() {
        let d = distance_km(&Location::new(0.0, 0.0), &Location::new(0.0, 180.0));
        assert_close(d, EARTH_RADIUS_KM * std::f64::consts::PI);
    }

    #[test]
    fn should_compute_known_city_distance() {
        // London -> Paris is roughly 343.5 km on a 6371 km sphere.
        let london = Location::new(51.5074, -0.1278);
        let paris = Location::new(48.8566, 2.3522);
        let d = london.distance_to(&paris);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn should_accept_boundary_coordinates() {
        assert!(Location::new(90.0, 180.0).validate().is_ok());
        assert!(Location::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn should_reject_out_of_range_latitude() {
        assert_eq!(
            Location::new(90.5, 0.0).validate(),
            Err(ConstraintViolation::LatitudeOutOfRange(90.5))
        );
    }

    #[test]
    fn should_reject_out_of_range_longitude() {
        assert_eq!(
            Location::new(0.0, -180.5).validate(),
            Err(ConstraintViolation::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn should_reject_nan_coordinates() {
        assert_eq!(
            Location::new(f64::NAN, 0.0).validate(),
            Err(ConstraintViolation::NonFiniteCoordinate)
        );
    }
}
