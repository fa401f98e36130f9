//! Path tracking: the ordered point sequence of one walking session,
//! its cached cumulative length, and the corridor area derived from it.
//!
//! The tracker trusts its caller to have run every point through the
//! fix filter against the tracker's own last point - consecutive
//! points are therefore always at least the configured minimum
//! movement apart.

use std::f64::consts::PI;

use geo::{algorithm::simplify::Simplify, Coord, LineString};

use crate::geo_utils::haversine_distance;
use crate::{GeoPoint, TrackConfig};

/// Lifecycle state of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No points recorded yet.
    Idle,
    /// At least one point recorded.
    Tracking,
}

/// Ordered, append-only sequence of accepted points with a cached
/// cumulative length.
///
/// The length is updated incrementally on each append; it is never
/// re-summed from scratch. Degenerate queries (length of an empty
/// path, corridor of an empty path) yield zero rather than errors.
#[derive(Debug, Clone, Default)]
pub struct PathTracker {
    points: Vec<GeoPoint>,
    total_length_m: f64,
}

impl PathTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            total_length_m: 0.0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackerState {
        if self.points.is_empty() {
            TrackerState::Idle
        } else {
            TrackerState::Tracking
        }
    }

    /// Append an already-filtered point.
    ///
    /// The cached length grows by the great-circle distance from the
    /// previous point; the first point contributes nothing.
    pub fn append(&mut self, point: GeoPoint) {
        if let Some(last) = self.points.last() {
            self.total_length_m += haversine_distance(last, &point);
        }
        self.points.push(point);
    }

    /// Cumulative walked length in meters. O(1).
    pub fn length(&self) -> f64 {
        self.total_length_m
    }

    /// The last accepted point, if any.
    pub fn last_point(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    /// All accepted points in order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Number of accepted points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Area of the constant-width corridor swept along the path, in
    /// square meters: `length * 2 * radius` for the strip plus
    /// `pi * radius^2` for the two semicircular end caps.
    ///
    /// An empty path claims nothing; a single point claims only the
    /// cap circle.
    pub fn corridor_area(&self, radius_m: f64) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.total_length_m * 2.0 * radius_m + PI * radius_m * radius_m
    }

    /// Clear the path and zero the cached length, returning the
    /// tracker to [`TrackerState::Idle`].
    pub fn reset(&mut self) {
        self.points.clear();
        self.total_length_m = 0.0;
    }

    /// Close the path into a ring by appending its own first point.
    ///
    /// Returns `None` below 3 points - nothing encloses area yet.
    pub fn finalize_ring(&self) -> Option<Vec<GeoPoint>> {
        if self.points.len() < 3 {
            return None;
        }
        let mut ring = self.points.clone();
        ring.push(self.points[0]);
        Some(ring)
    }
}

/// Simplify a ring for reporting: Douglas-Peucker with the configured
/// tolerance, then uniform down-sampling to `max_ring_points`.
///
/// Endpoints survive both passes, and a ring never drops below 3
/// distinct vertices plus closure; rings already that small pass
/// through unchanged.
pub fn simplify_ring(ring: &[GeoPoint], config: &TrackConfig) -> Vec<GeoPoint> {
    if ring.len() <= 4 {
        return ring.to_vec();
    }

    let coords: Vec<Coord> = ring
        .iter()
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();
    let line = LineString::new(coords);
    let simplified = line.simplify(&config.simplification_tolerance);

    let final_coords: Vec<Coord> = if simplified.0.len() > config.max_ring_points {
        let step = simplified.0.len() as f64 / config.max_ring_points as f64;
        let mut sampled: Vec<Coord> = (0..config.max_ring_points)
            .map(|i| simplified.0[(i as f64 * step) as usize])
            .collect();
        // Uniform sampling can drop the closing vertex; restore it.
        if let Some(last) = simplified.0.last() {
            if sampled.last() != Some(last) {
                sampled.push(*last);
            }
        }
        sampled
    } else {
        simplified.0
    };

    if final_coords.len() < 4 {
        return ring.to_vec();
    }

    final_coords
        .iter()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect()
}
