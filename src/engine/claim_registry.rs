//! Spatially indexed registry of accepted claim circles.
//!
//! An R-tree over claim bounding boxes narrows overlap validation to
//! plausible neighbors before the exact great-circle check runs. The
//! registry enforces nothing on its own - callers validate before they
//! insert, and the persistence layer owns the commit ordering.

use std::collections::HashMap;

use rstar::{RTree, RTreeObject, AABB};

use crate::claims::{validate_claim, OverlapRejection};
use crate::geo_utils::meters_to_degrees;
use crate::{ClaimCircle, GeoPoint};

/// Claim bounding box wrapper for R-tree indexing.
#[derive(Debug, Clone, PartialEq)]
struct ClaimBounds {
    claim_id: String,
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl ClaimBounds {
    fn from_claim(claim: &ClaimCircle) -> Self {
        let (lat_pad, lng_pad) = radius_in_degrees(&claim.center, claim.radius_m);
        Self {
            claim_id: claim.id.clone(),
            min_lat: claim.center.latitude - lat_pad,
            max_lat: claim.center.latitude + lat_pad,
            min_lng: claim.center.longitude - lng_pad,
            max_lng: claim.center.longitude + lng_pad,
        }
    }
}

impl RTreeObject for ClaimBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_lng, self.min_lat], [self.max_lng, self.max_lat])
    }
}

/// A circle radius expressed as (lat, lng) degree offsets at its center.
fn radius_in_degrees(center: &GeoPoint, radius_m: f64) -> (f64, f64) {
    (
        meters_to_degrees(radius_m, 0.0),
        meters_to_degrees(radius_m, center.latitude),
    )
}

/// Registry of accepted claims with R-tree prefiltered validation.
#[derive(Debug, Default)]
pub struct ClaimRegistry {
    tree: RTree<ClaimBounds>,
    claims: HashMap<String, ClaimCircle>,
}

impl ClaimRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            claims: HashMap::new(),
        }
    }

    /// Build a registry from already-validated claims.
    pub fn from_claims(claims: Vec<ClaimCircle>) -> Self {
        let bounds: Vec<ClaimBounds> = claims.iter().map(ClaimBounds::from_claim).collect();
        Self {
            tree: RTree::bulk_load(bounds),
            claims: claims.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// Validate a candidate against registered claims.
    ///
    /// The R-tree narrows the scan to claims whose padded bounds touch
    /// the candidate's; the exact center-distance check then runs only
    /// on those.
    pub fn validate(&self, candidate: &ClaimCircle) -> std::result::Result<(), OverlapRejection> {
        let (lat_pad, lng_pad) = radius_in_degrees(&candidate.center, candidate.radius_m);
        let envelope = AABB::from_corners(
            [
                candidate.center.longitude - lng_pad,
                candidate.center.latitude - lat_pad,
            ],
            [
                candidate.center.longitude + lng_pad,
                candidate.center.latitude + lat_pad,
            ],
        );

        let nearby: Vec<ClaimCircle> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|b| self.claims.get(&b.claim_id).cloned())
            .collect();

        validate_claim(candidate, &nearby)
    }

    /// Validate and, on success, register the claim.
    pub fn validate_and_insert(
        &mut self,
        claim: ClaimCircle,
    ) -> std::result::Result<(), OverlapRejection> {
        self.validate(&claim)?;
        self.insert(claim);
        Ok(())
    }

    /// Register a claim without validation.
    ///
    /// For rehydrating claims the persistence layer already accepted.
    pub fn insert(&mut self, claim: ClaimCircle) {
        self.tree.insert(ClaimBounds::from_claim(&claim));
        self.claims.insert(claim.id.clone(), claim);
    }

    /// Remove a claim by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<ClaimCircle> {
        let claim = self.claims.remove(id)?;
        self.tree.remove(&ClaimBounds::from_claim(&claim));
        Some(claim)
    }

    /// Get a claim by id.
    pub fn get(&self, id: &str) -> Option<&ClaimCircle> {
        self.claims.get(id)
    }

    /// All registered claims in arbitrary order.
    pub fn claims(&self) -> impl Iterator<Item = &ClaimCircle> {
        self.claims.values()
    }

    /// Number of registered claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Drop all claims.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.claims.clear();
    }
}
