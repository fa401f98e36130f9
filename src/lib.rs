//! # Trailclaim
//!
//! Trajectory geometry engine for walk-to-claim territory games.
//!
//! This library provides:
//! - GPS fix filtering (accuracy, teleport and deadband policies)
//! - Incremental path tracking with corridor length/area
//! - Self-intersection detection for closed walking loops
//! - Planar polygon area for claimed loops
//! - Overlap validation for circular territory claims
//! - Session engine with spatially indexed claim registry
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel claim validation with rayon
//! - **`synthetic`** - Enable synthetic GPS walk generation for stress testing
//! - **`cli`** - Build the GPX replay debug CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use trailclaim::{ClaimEngine, GpsFix, TrackConfig};
//!
//! let mut engine = ClaimEngine::new();
//! engine.create_session("walker-1", TrackConfig::default()).unwrap();
//!
//! // Feed GPS fixes as they arrive; rejected fixes never touch the path.
//! let fix = GpsFix::new(51.5074, -0.1278).with_accuracy(8.0);
//! let outcome = engine.filter_and_append("walker-1", fix).unwrap();
//! println!("outcome: {outcome:?}");
//!
//! // Loops are reported whenever the walked path crosses itself.
//! for loop_hit in engine.poll_intersections("walker-1").unwrap() {
//!     println!("closed loop of {:.0} m²", loop_hit.area_m2);
//! }
//! ```
//!
//! The engine performs no I/O and reports geometric facts only; what a
//! detected loop or validated claim is worth belongs to the caller.

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Error, Result};

// Geographic utilities (distance, projection, bounds, center)
pub mod geo_utils;

// GPS fix filtering policy
pub mod filter;
pub use filter::{evaluate_fix, FilterOutcome};

// Path tracking (ordered points, cached length, corridor area)
pub mod path;
pub use path::{PathTracker, TrackerState};

// Self-intersection detection over a walked path
pub mod intersection;
pub use intersection::{
    find_loop_intersections, segment_intersection, LoopIntersection, SegmentCrossing,
};

// Polygon area over a closed geographic ring
pub mod area;
pub use area::polygon_area;

// Claim circle overlap validation
pub mod claims;
#[cfg(feature = "parallel")]
pub use claims::validate_claim_parallel;
pub use claims::{validate_claim, OverlapRejection};

// Session engine with claim registry
pub mod engine;
pub use engine::{ClaimEngine, ClaimRegistry, FinalizedClaim, SessionStore, TrackingSession};

// Synthetic walk generation for stress testing and benchmarks
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A raw GPS reading as delivered by a positioning API, before filtering.
///
/// # Example
/// ```
/// use trailclaim::GpsFix;
/// let fix = GpsFix::new(51.5074, -0.1278).with_accuracy(12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported horizontal accuracy in meters (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Unix timestamp in milliseconds (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl GpsFix {
    /// Create a new fix without accuracy or timestamp.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: None,
        }
    }

    /// Attach a reported accuracy in meters.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Attach a unix timestamp in milliseconds.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check that the coordinates are finite and within valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// An accepted GPS coordinate on a walked path.
///
/// Points are compared only through [`geo_utils::haversine_distance`],
/// never through coordinate equality - floating noise makes exact
/// coordinate comparison meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Unix timestamp in milliseconds (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Accuracy of the originating fix in meters (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl GeoPoint {
    /// Create a new point without timestamp or accuracy.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: None,
            accuracy: None,
        }
    }

    /// Check that the coordinates are finite and within valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

impl From<GpsFix> for GeoPoint {
    fn from(fix: GpsFix) -> Self {
        Self {
            latitude: fix.latitude,
            longitude: fix.longitude,
            timestamp: fix.timestamp,
            accuracy: fix.accuracy,
        }
    }
}

/// Bounding box for a path or claim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// A circular territory claim on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimCircle {
    /// Unique identifier for the claim
    pub id: String,
    /// Center of the claimed circle
    pub center: GeoPoint,
    /// Radius in meters
    pub radius_m: f64,
}

impl ClaimCircle {
    pub fn new(id: impl Into<String>, center: GeoPoint, radius_m: f64) -> Self {
        Self {
            id: id.into(),
            center,
            radius_m,
        }
    }
}

/// Configuration for fix filtering, corridor geometry and loop detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Fixes with reported accuracy above this are rejected.
    /// Default: 30.0 meters (multipath noise protection)
    pub max_accuracy_m: f64,

    /// Movement beyond this between consecutive fixes is treated as a
    /// GPS teleport glitch and rejected. Default: 100.0 meters
    pub max_jump_m: f64,

    /// Movement below this is stationary jitter and rejected.
    /// Default: 5.0 meters (can be lowered to 2.0 for finer tracking)
    pub min_movement_m: f64,

    /// Half-width of the claimed corridor swept along the path.
    /// Default: 10.0 meters
    pub corridor_radius_m: f64,

    /// Determinant magnitude below which two segments are treated as
    /// parallel (no intersection). Default: 1e-10
    pub parallel_epsilon: f64,

    /// Minimum path points before loop detection runs; fewer points
    /// cannot self-intersect meaningfully. Default: 4
    pub min_loop_points: usize,

    /// Tolerance for Douglas-Peucker ring simplification (in degrees).
    /// Smaller values preserve more detail. Default: 0.0001 (~11 meters)
    pub simplification_tolerance: f64,

    /// Maximum points in a reported ring after simplification.
    /// Default: 100
    pub max_ring_points: usize,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: 30.0,
            max_jump_m: 100.0,
            min_movement_m: 5.0,
            corridor_radius_m: 10.0,
            parallel_epsilon: 1e-10,
            min_loop_points: 4,
            simplification_tolerance: 0.0001,
            max_ring_points: 100,
        }
    }
}
