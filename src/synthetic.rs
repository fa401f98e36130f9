//! Synthetic GPS walk generator for stress testing and benchmarking.
//!
//! Generates fix streams with known geometry - straight strolls,
//! closed loops, figure-eights - providing ground truth for loop
//! detection and area validation.
//!
//! Feature-gated behind `synthetic` - not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use trailclaim::synthetic::{WalkPattern, WalkScenario};
//! use trailclaim::GeoPoint;
//!
//! let scenario = WalkScenario {
//!     origin: GeoPoint::new(47.37, 8.55),
//!     point_count: 200,
//!     step_meters: 12.0,
//!     pattern: WalkPattern::FigureEight,
//!     gps_noise_sigma_meters: 2.0,
//!     seed: 42,
//! };
//!
//! let fixes = scenario.generate();
//! assert_eq!(fixes.len(), 200);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::geo_utils::METERS_PER_DEGREE;
use crate::{GeoPoint, GpsFix};

/// Shape of a generated walk.
#[derive(Debug, Clone, Copy)]
pub enum WalkPattern {
    /// Straight stroll with minor heading wobble. Never self-intersects.
    Straight,
    /// Closed ring that returns to its start without crossing itself.
    ClosedLoop,
    /// Lemniscate crossing itself once at the origin.
    FigureEight,
}

/// Configuration for one synthetic walk.
#[derive(Debug, Clone)]
pub struct WalkScenario {
    /// Where the walk starts.
    pub origin: GeoPoint,
    /// Number of fixes to generate.
    pub point_count: usize,
    /// Approximate spacing between consecutive fixes in meters.
    pub step_meters: f64,
    /// Shape of the walk.
    pub pattern: WalkPattern,
    /// GPS noise amplitude in meters (uniform per-axis wobble).
    pub gps_noise_sigma_meters: f64,
    /// RNG seed; the same seed always produces the same walk.
    pub seed: u64,
}

impl WalkScenario {
    /// Generate the fix stream for this scenario.
    pub fn generate(&self) -> Vec<GpsFix> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let lat_cos = self.origin.latitude.to_radians().cos().max(0.01);

        (0..self.point_count)
            .map(|i| {
                let progress = i as f64 / self.point_count.max(1) as f64;
                let (east_m, north_m) = self.offset_at(progress);

                let noise = self.gps_noise_sigma_meters;
                let noise_east = if noise > 0.0 {
                    rng.gen_range(-noise..noise)
                } else {
                    0.0
                };
                let noise_north = if noise > 0.0 {
                    rng.gen_range(-noise..noise)
                } else {
                    0.0
                };

                let lat =
                    self.origin.latitude + (north_m + noise_north) / METERS_PER_DEGREE;
                let lng = self.origin.longitude
                    + (east_m + noise_east) / (METERS_PER_DEGREE * lat_cos);

                GpsFix::new(lat, lng)
                    .with_accuracy(rng.gen_range(3.0..15.0))
                    .with_timestamp((i as i64) * 1_000)
            })
            .collect()
    }

    /// Planar offset from the origin in meters at `progress` in [0, 1).
    fn offset_at(&self, progress: f64) -> (f64, f64) {
        let extent = self.point_count as f64 * self.step_meters;

        match self.pattern {
            WalkPattern::Straight => (progress * extent, progress * extent * 0.1),
            WalkPattern::ClosedLoop => {
                let radius = extent / (2.0 * PI);
                let angle = progress * 2.0 * PI;
                (radius * angle.cos() - radius, radius * angle.sin())
            }
            WalkPattern::FigureEight => {
                // Lemniscate of Gerono: crosses itself once where the
                // lobes meet. The quarter-turn phase keeps both origin
                // transits strictly inside the walk, so the crossing
                // lands mid-segment instead of on the shared endpoints.
                let half_span = extent / 4.0;
                let t = progress * 2.0 * PI + PI / 4.0;
                (half_span * t.sin(), half_span * t.sin() * t.cos())
            }
        }
    }
}
