//! Geographic utilities: great-circle distance, degree/meter
//! conversion, local planar projection, bounds and center helpers.
//!
//! All functions here are pure; angles are degrees at the boundary and
//! radians internally, distances are meters.

use crate::{Bounds, GeoPoint};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Great-circle distance between two points in meters, via the
/// haversine formula.
///
/// Symmetric, zero for identical points. The haversine intermediate is
/// clamped to [0, 1] before the inverse trig step so antipodal and
/// near-zero separations never round outside the domain of `asin`.
///
/// # Example
/// ```
/// use trailclaim::GeoPoint;
/// use trailclaim::geo_utils::haversine_distance;
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
/// let d = haversine_distance(&london, &paris);
/// assert!((d - 343_560.0).abs() < 5_000.0);
/// ```
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Convert a distance in meters to degrees of longitude at the given
/// latitude. Degrees of latitude are the `latitude = 0.0` case.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    let scale = latitude.to_radians().cos().abs().max(1e-6);
    meters / (METERS_PER_DEGREE * scale)
}

/// Project a point onto a local plane centered at `reference`,
/// returning `(x, y)` in meters (x east, y north).
///
/// Equirectangular approximation: valid while the extent is small
/// relative to Earth's radius. Not usable near the poles or across the
/// antimeridian.
pub fn project_to_meters(point: &GeoPoint, reference: &GeoPoint) -> (f64, f64) {
    let x = (point.longitude - reference.longitude)
        * METERS_PER_DEGREE
        * reference.latitude.to_radians().cos();
    let y = (point.latitude - reference.latitude) * METERS_PER_DEGREE;
    (x, y)
}

/// Compute the bounding box of a track. Returns a degenerate
/// zero-sized box at the origin for an empty slice.
pub fn compute_bounds(points: &[GeoPoint]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    })
}

/// Compute the arithmetic center of a track, `(0, 0)` when empty.
pub fn compute_center(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }
    let lat: f64 = points.iter().map(|p| p.latitude).sum();
    let lng: f64 = points.iter().map(|p| p.longitude).sum();
    GeoPoint::new(lat / points.len() as f64, lng / points.len() as f64)
}

/// Total length of a track in meters, summed over consecutive pairs.
pub fn track_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}
