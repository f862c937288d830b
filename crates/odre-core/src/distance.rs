//! Great-circle distance on a spherical earth.
//!
//! Uses the spherical law of cosines with the conventional earth radius
//! (6 378 137 m), which is accurate enough for matching line ends to substations.

use crate::Coordinate;

/// Conventional earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Distance in meters between two points given in decimal degrees.
///
/// Bit-identical points short-circuit to 0. For nearly identical points the cosine
/// can land a rounding error outside `[-1, 1]`, so it is clamped before `acos`.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let delta = (lon1 - lon2).to_radians();
    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta.cos();
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}

/// [`distance`] for two [`Coordinate`]s.
#[inline]
pub fn distance_between(a: &Coordinate, b: &Coordinate) -> f64 {
    distance(a.lat, a.lon, b.lat, b.lon)
}
