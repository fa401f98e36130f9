//! Claim circle overlap validation.
//!
//! The invariant enforced is "no two accepted claim circles ever
//! overlap". Validation is a pure check at decision time - whoever
//! commits claims is responsible for calling it before the commit, the
//! validator itself takes no locks and keeps no state.

use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::ClaimCircle;

/// Why a candidate claim was refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapRejection {
    /// Id of the first conflicting claim found.
    pub conflicting_id: String,
    /// Center-to-center distance to that claim in meters.
    pub distance_m: f64,
    /// Minimum center distance the two radii would have required.
    pub required_m: f64,
}

impl std::fmt::Display for OverlapRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "overlaps claim '{}': centers {:.1} m apart, {:.1} m required",
            self.conflicting_id, self.distance_m, self.required_m
        )
    }
}

/// Validate a candidate claim circle against existing claims.
///
/// A candidate conflicts with an existing claim when the
/// center-to-center distance is below the sum of the radii. The first
/// conflict found is reported; there is no requirement to enumerate
/// all of them.
///
/// # Example
/// ```
/// use trailclaim::{validate_claim, ClaimCircle, GeoPoint};
///
/// let existing = vec![ClaimCircle::new("a", GeoPoint::new(0.0, 0.0), 50.0)];
/// let far = ClaimCircle::new("b", GeoPoint::new(0.002, 0.0), 50.0);
/// assert!(validate_claim(&far, &existing).is_ok());
/// ```
pub fn validate_claim(
    candidate: &ClaimCircle,
    existing: &[ClaimCircle],
) -> Result<(), OverlapRejection> {
    for claim in existing {
        if let Some(rejection) = check_pair(candidate, claim) {
            return Err(rejection);
        }
    }
    Ok(())
}

/// Validate a candidate claim circle against existing claims in
/// parallel.
///
/// Same contract as [`validate_claim`] except that with many existing
/// claims the scan fans out over rayon. Since only one conflict is
/// ever reported, whichever thread finds one first wins - the
/// *specific* conflicting claim may differ from the sequential scan.
#[cfg(feature = "parallel")]
pub fn validate_claim_parallel(
    candidate: &ClaimCircle,
    existing: &[ClaimCircle],
) -> Result<(), OverlapRejection> {
    use rayon::prelude::*;

    match existing
        .par_iter()
        .find_map_any(|claim| check_pair(candidate, claim))
    {
        Some(rejection) => Err(rejection),
        None => Ok(()),
    }
}

/// Check one candidate/existing pair, returning the rejection if they
/// overlap.
fn check_pair(candidate: &ClaimCircle, existing: &ClaimCircle) -> Option<OverlapRejection> {
    let distance_m = haversine_distance(&candidate.center, &existing.center);
    let required_m = candidate.radius_m + existing.radius_m;

    if distance_m < required_m {
        Some(OverlapRejection {
            conflicting_id: existing.id.clone(),
            distance_m,
            required_m,
        })
    } else {
        None
    }
}
