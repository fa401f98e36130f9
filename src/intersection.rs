//! Self-intersection detection over a walked path.
//!
//! Every pair of non-adjacent segments is tested with the standard
//! orientation/cross-product predicate; hits are resolved to an exact
//! crossing point with the parametric line-intersection formula and
//! reported together with the enclosed loop and its area.
//!
//! The scan is a full O(n²) pass over the path on every call - an
//! accepted trade-off for interactive session lengths (hundreds to low
//! thousands of points). Rescanning only newly appended segments
//! against history would make this O(n) amortized and is the natural
//! upgrade path for unbounded sessions.

use serde::{Deserialize, Serialize};

use crate::area::polygon_area;
use crate::{GeoPoint, TrackConfig};

/// Result of testing two segments for intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentCrossing {
    /// Segments do not cross (including the near-parallel case).
    Miss,
    /// Segments cross at `point`; `t` and `u` are the interpolation
    /// parameters along the first and second segment.
    Hit { point: GeoPoint, t: f64, u: f64 },
}

/// A detected self-closing loop in a walked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopIntersection {
    /// The computed crossing point.
    pub point: GeoPoint,
    /// The enclosed loop, bracketed by `point` at both ends.
    pub ring: Vec<GeoPoint>,
    /// Enclosed area in square meters.
    pub area_m2: f64,
    /// Index of the earlier segment's start point.
    pub segment_start: usize,
    /// Index of the later segment's start point.
    pub segment_end: usize,
}

/// Test two segments `(a1, a2)` and `(b1, b2)` for intersection.
///
/// Solves `A1 + t(A2-A1) = B1 + u(B2-B1)` for `t` and `u`; a crossing
/// exists when both lie in [0, 1]. Determinant magnitudes below
/// `epsilon` are treated as parallel - a miss, not an error.
///
/// The test runs directly on longitude/latitude pairs. The local
/// planar projection is an affine map at walking scale, so the
/// crossing decision and the interpolation parameters are unchanged by
/// it; projecting first would only add work. Collinear overlap gets no
/// special casing - GPS noise never produces exact collinearity.
pub fn segment_intersection(
    a1: &GeoPoint,
    a2: &GeoPoint,
    b1: &GeoPoint,
    b2: &GeoPoint,
    epsilon: f64,
) -> SegmentCrossing {
    let d1x = a2.longitude - a1.longitude;
    let d1y = a2.latitude - a1.latitude;
    let d2x = b2.longitude - b1.longitude;
    let d2y = b2.latitude - b1.latitude;

    // Cross product of the direction vectors
    let det = d1x * d2y - d1y * d2x;
    if det.abs() < epsilon {
        return SegmentCrossing::Miss;
    }

    let dx = b1.longitude - a1.longitude;
    let dy = b1.latitude - a1.latitude;

    let t = (dx * d2y - dy * d2x) / det;
    let u = (dx * d1y - dy * d1x) / det;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return SegmentCrossing::Miss;
    }

    let point = GeoPoint::new(a1.latitude + t * d1y, a1.longitude + t * d1x);
    SegmentCrossing::Hit { point, t, u }
}

/// Scan a path for self-intersections and extract the enclosed loops.
///
/// Each segment `(points[i], points[i+1])` is tested against every
/// later non-adjacent segment `(points[j], points[j+1])` with
/// `j >= i + 2`. On a hit, the loop ring is the crossing point, the
/// points `i+1 ..= j`, and the crossing point again to close.
///
/// Paths shorter than `config.min_loop_points` cannot self-intersect
/// meaningfully and return an empty vec.
///
/// Hits are reported in index order of the earlier segment. When one
/// scan finds several crossings, nested and overlapping loops are all
/// reported independently - no geometric deduplication is performed;
/// callers that award once per walk must deduplicate downstream.
pub fn find_loop_intersections(points: &[GeoPoint], config: &TrackConfig) -> Vec<LoopIntersection> {
    if points.len() < config.min_loop_points {
        return Vec::new();
    }

    let mut loops = Vec::new();
    let segment_count = points.len() - 1;

    for i in 0..segment_count {
        // j starts at i + 2: adjacent segments share an endpoint and
        // would always "cross" there.
        for j in (i + 2)..segment_count {
            let crossing = segment_intersection(
                &points[i],
                &points[i + 1],
                &points[j],
                &points[j + 1],
                config.parallel_epsilon,
            );

            if let SegmentCrossing::Hit { point, .. } = crossing {
                let mut ring = Vec::with_capacity(j - i + 2);
                ring.push(point);
                ring.extend_from_slice(&points[i + 1..=j]);
                ring.push(point);

                let area_m2 = polygon_area(&ring);

                loops.push(LoopIntersection {
                    point,
                    ring,
                    area_m2,
                    segment_start: i,
                    segment_end: j,
                });
            }
        }
    }

    loops
}
