//! # Claim Engine
//!
//! Session-oriented facade over the geometry core, composed of focused
//! modules:
//! - `SessionStore` - per-session tracking state CRUD
//! - `ClaimRegistry` - R-tree indexed overlap validation
//!
//! All derived computation (length, corridor area, loop scan) happens
//! synchronously in response to each accepted fix; the engine has no
//! background tasks, performs no I/O, and holds no state beyond the
//! sessions and claims themselves. The external API layer marshals the
//! results to JSON, hence the `*_json` helpers.

pub mod claim_registry;
pub mod session_store;

pub use claim_registry::ClaimRegistry;
pub use session_store::{SessionStore, TrackingSession};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::claims::OverlapRejection;
use crate::error::{OptionExt, Result};
use crate::filter::{evaluate_fix, FilterOutcome};
use crate::geo_utils::compute_bounds;
use crate::intersection::{find_loop_intersections, LoopIntersection};
use crate::path::simplify_ring;
use crate::{polygon_area, Bounds, ClaimCircle, GeoPoint, GpsFix, TrackConfig};

/// A finalized walk, closed into a ring and measured.
///
/// Bounds and center are pre-computed so the rendering side can place
/// the claim without re-deriving them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedClaim {
    /// Simplified closed ring of the walk.
    pub ring: Vec<GeoPoint>,
    /// Enclosed area in square meters (computed on the full ring).
    pub area_m2: f64,
    /// Bounding box of the ring.
    pub bounds: Bounds,
    /// Center of the bounding box.
    pub center: GeoPoint,
}

/// Session engine: filters fixes into per-session paths, reports loop
/// closures and finalized rings, and validates territory claims.
#[derive(Debug, Default)]
pub struct ClaimEngine {
    pub sessions: SessionStore,
    pub claims: ClaimRegistry,
}

impl ClaimEngine {
    /// Create a new engine with no sessions or claims.
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new(),
            claims: ClaimRegistry::new(),
        }
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Register a new tracking session.
    pub fn create_session(&mut self, session_id: &str, config: TrackConfig) -> Result<()> {
        self.sessions.create(session_id, config)
    }

    /// Remove a session entirely, returning its final state.
    pub fn remove_session(&mut self, session_id: &str) -> Result<TrackingSession> {
        self.sessions
            .remove(session_id)
            .ok_or_session_not_found(session_id)
    }

    /// Clear a session's path and zero its derived values. The session
    /// stays registered and ready for new fixes.
    pub fn reset_session(&mut self, session_id: &str) -> Result<()> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_session_not_found(session_id)?;
        session.tracker.reset();
        Ok(())
    }

    // ========================================================================
    // Fix Ingestion
    // ========================================================================

    /// Run one raw fix through the filter and, on acceptance, append
    /// it to the session's path.
    pub fn filter_and_append(&mut self, session_id: &str, fix: GpsFix) -> Result<FilterOutcome> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_session_not_found(session_id)?;

        let outcome = evaluate_fix(session.tracker.last_point(), &fix, &session.config);

        match &outcome {
            FilterOutcome::Accepted(point) => {
                session.tracker.append(*point);
            }
            rejected => {
                debug!("session '{}': fix rejected: {:?}", session_id, rejected);
            }
        }

        Ok(outcome)
    }

    // ========================================================================
    // Derived Queries
    // ========================================================================

    /// Cumulative walked length of a session in meters.
    pub fn current_length(&self, session_id: &str) -> Result<f64> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_session_not_found(session_id)?;
        Ok(session.tracker.length())
    }

    /// Corridor area of a session in square meters. A `None` radius
    /// uses the session's configured corridor radius.
    pub fn current_corridor_area(&self, session_id: &str, radius_m: Option<f64>) -> Result<f64> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_session_not_found(session_id)?;
        let radius = radius_m.unwrap_or(session.config.corridor_radius_m);
        Ok(session.tracker.corridor_area(radius))
    }

    /// Scan the session's path for self-intersections.
    ///
    /// Call after each accepted append. This rescans the entire path;
    /// loops are reported every time until the caller consumes them
    /// and resets or continues the walk past them.
    pub fn poll_intersections(&self, session_id: &str) -> Result<Vec<LoopIntersection>> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_session_not_found(session_id)?;

        let loops = find_loop_intersections(session.tracker.points(), &session.config);
        if !loops.is_empty() {
            info!(
                "session '{}': {} loop(s) detected, largest {:.1} m²",
                session_id,
                loops.len(),
                loops.iter().map(|l| l.area_m2).fold(0.0, f64::max)
            );
        }
        Ok(loops)
    }

    /// Close the session's path with an implicit edge back to its
    /// start and measure the enclosed polygon.
    ///
    /// Used for explicit "finalize polygon" user actions - no true
    /// self-intersection is required. Returns `Ok(None)` while the
    /// path has fewer than 3 points. The path itself is untouched;
    /// the caller decides whether to reset afterwards.
    pub fn finalize(&self, session_id: &str) -> Result<Option<FinalizedClaim>> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_session_not_found(session_id)?;

        let Some(full_ring) = session.tracker.finalize_ring() else {
            return Ok(None);
        };

        let area_m2 = polygon_area(&full_ring);
        let ring = simplify_ring(&full_ring, &session.config);
        let bounds = compute_bounds(&ring);
        let center = bounds.center();

        info!(
            "session '{}': finalized ring of {} points, {:.1} m²",
            session_id,
            ring.len(),
            area_m2
        );

        Ok(Some(FinalizedClaim {
            ring,
            area_m2,
            bounds,
            center,
        }))
    }

    // ========================================================================
    // Claims
    // ========================================================================

    /// Validate a candidate claim circle against all registered claims.
    pub fn validate_claim(&self, candidate: &ClaimCircle) -> std::result::Result<(), OverlapRejection> {
        self.claims.validate(candidate)
    }

    /// Validate a candidate and register it on success.
    pub fn register_claim(&mut self, claim: ClaimCircle) -> std::result::Result<(), OverlapRejection> {
        self.claims.validate_and_insert(claim)
    }

    // ========================================================================
    // JSON Surface
    // ========================================================================

    /// Serialize a session's path points as a JSON array.
    pub fn session_path_json(&self, session_id: &str) -> Result<String> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_session_not_found(session_id)?;

        Ok(serde_json::to_string(session.tracker.points()).unwrap_or_else(|e| {
            warn!(
                "failed to serialize path for session '{}': {}",
                session_id, e
            );
            "[]".to_string()
        }))
    }

    /// Serialize all registered claims as a JSON array.
    pub fn claims_json(&self) -> String {
        let claims: Vec<&ClaimCircle> = self.claims.claims().collect();
        serde_json::to_string(&claims).unwrap_or_else(|e| {
            warn!("failed to serialize claims: {}", e);
            "[]".to_string()
        })
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Engine statistics for monitoring.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            session_count: self.sessions.len(),
            claim_count: self.claims.len(),
            total_points: self
                .sessions
                .ids()
                .filter_map(|id| self.sessions.get(id))
                .map(|s| s.tracker.len())
                .sum(),
        }
    }
}

/// Engine statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub session_count: usize,
    pub claim_count: usize,
    pub total_points: usize,
}
