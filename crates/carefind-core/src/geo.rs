//! Great-circle distance on a spherical Earth.

use crate::types::Coordinates;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters between two points given in decimal degrees.
///
/// NaN inputs propagate to a NaN result.
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for antipodal points. `clamp` keeps NaN.
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();
    EARTH_RADIUS_METERS * c
}

#[must_use]
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    distance(a.lat, a.lon, b.lat, b.lon)
}
