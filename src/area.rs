//! Polygon area over a closed ring of geographic points.
//!
//! Vertices are projected onto a local plane around the ring's first
//! point and run through the shoelace formula. The approximation holds
//! while the ring's extent is small relative to Earth's radius - true
//! for pedestrian-scale claims. It is not valid near the poles or
//! across the antimeridian; that is a documented limitation, not a
//! defect.

use crate::geo_utils::project_to_meters;
use crate::GeoPoint;

/// Area enclosed by a ring of geographic points, in square meters.
///
/// Returns 0 for fewer than 3 points. The ring may be open or
/// explicitly closed - the formula wraps the index either way, and a
/// duplicated closing vertex contributes nothing.
///
/// # Example
/// ```
/// use trailclaim::{polygon_area, GeoPoint};
///
/// // Roughly 100 m x 100 m square at the equator.
/// let side = 100.0 / 111_320.0;
/// let ring = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, side),
///     GeoPoint::new(side, side),
///     GeoPoint::new(side, 0.0),
/// ];
/// let area = polygon_area(&ring);
/// assert!((area - 10_000.0).abs() < 300.0);
/// ```
pub fn polygon_area(ring: &[GeoPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let reference = &ring[0];
    let projected: Vec<(f64, f64)> = ring
        .iter()
        .map(|p| project_to_meters(p, reference))
        .collect();

    let mut sum = 0.0;
    for i in 0..projected.len() {
        let (x1, y1) = projected[i];
        let (x2, y2) = projected[(i + 1) % projected.len()];
        sum += x1 * y2 - x2 * y1;
    }

    sum.abs() / 2.0
}
