//! GPS fix filtering policy.
//!
//! Raw fixes pass through a fixed policy chain before they may touch a
//! path: coordinate validity, reported accuracy, teleport distance,
//! and a stationary deadband. The filter is a pure decision function -
//! the caller feeds back the previously accepted point, nothing is
//! stored here.

use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::{GeoPoint, GpsFix, TrackConfig};

/// Outcome of evaluating one raw fix against the filter policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FilterOutcome {
    /// Fix passed all checks and was promoted to a path point.
    Accepted(GeoPoint),
    /// Coordinates were non-finite or out of range.
    RejectedInvalid,
    /// Reported accuracy was above the configured threshold.
    RejectedLowAccuracy,
    /// Distance from the previous point exceeded the teleport limit.
    RejectedJump,
    /// Distance from the previous point was below the deadband.
    RejectedTooClose,
}

impl FilterOutcome {
    /// Whether the fix was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterOutcome::Accepted(_))
    }

    /// The accepted point, if any.
    pub fn accepted_point(&self) -> Option<&GeoPoint> {
        match self {
            FilterOutcome::Accepted(p) => Some(p),
            _ => None,
        }
    }
}

/// Evaluate one raw fix against the filter policy.
///
/// Checks run in order:
/// 1. coordinate validity (non-finite or out-of-range fixes never
///    reach the geometry),
/// 2. reported accuracy vs `max_accuracy_m` - multipath noise
///    protection; fixes without a reported accuracy skip this check,
/// 3. distance from `current` vs `max_jump_m` - GPS teleport glitches
///    would otherwise register as traversed distance or spurious
///    self-intersections,
/// 4. distance from `current` vs `min_movement_m` - debounces
///    stationary jitter so the path does not accumulate
///    micro-segments.
///
/// With no `current` point, steps 3 and 4 do not apply and any
/// valid, accurate fix starts the path.
///
/// # Example
/// ```
/// use trailclaim::{evaluate_fix, FilterOutcome, GpsFix, TrackConfig};
///
/// let config = TrackConfig::default();
/// let fix = GpsFix::new(51.5074, -0.1278).with_accuracy(45.0);
/// assert_eq!(
///     evaluate_fix(None, &fix, &config),
///     FilterOutcome::RejectedLowAccuracy
/// );
/// ```
pub fn evaluate_fix(
    current: Option<&GeoPoint>,
    fix: &GpsFix,
    config: &TrackConfig,
) -> FilterOutcome {
    if !fix.is_valid() {
        return FilterOutcome::RejectedInvalid;
    }

    if let Some(accuracy) = fix.accuracy {
        if accuracy > config.max_accuracy_m {
            return FilterOutcome::RejectedLowAccuracy;
        }
    }

    let candidate = GeoPoint::from(*fix);

    if let Some(prev) = current {
        let moved = haversine_distance(prev, &candidate);
        if moved > config.max_jump_m {
            return FilterOutcome::RejectedJump;
        }
        if moved < config.min_movement_m {
            return FilterOutcome::RejectedTooClose;
        }
    }

    FilterOutcome::Accepted(candidate)
}
