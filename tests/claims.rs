//! Tests for claim overlap validation

use trailclaim::{validate_claim, ClaimCircle, GeoPoint};

/// Degrees of latitude covering roughly `meters` at the equator.
fn lat_offset(meters: f64) -> f64 {
    meters / 111_320.0
}

fn circle(id: &str, lat: f64, radius_m: f64) -> ClaimCircle {
    ClaimCircle::new(id, GeoPoint::new(lat, 0.0), radius_m)
}

#[test]
fn test_no_existing_claims_accepts() {
    let candidate = circle("new", 0.0, 50.0);
    assert!(validate_claim(&candidate, &[]).is_ok());
}

#[test]
fn test_overlapping_claims_rejected() {
    // Two radius-50 circles 80 m apart: 80 < 100, overlap.
    let existing = vec![circle("held", 0.0, 50.0)];
    let candidate = circle("new", lat_offset(80.0), 50.0);

    let rejection = validate_claim(&candidate, &existing).unwrap_err();
    assert_eq!(rejection.conflicting_id, "held");
    assert!((rejection.distance_m - 80.0).abs() < 1.0);
    assert!((rejection.required_m - 100.0).abs() < 1e-9);
}

#[test]
fn test_separated_claims_accepted() {
    // Two radius-50 circles 120 m apart: 120 > 100, no overlap.
    let existing = vec![circle("held", 0.0, 50.0)];
    let candidate = circle("new", lat_offset(120.0), 50.0);
    assert!(validate_claim(&candidate, &existing).is_ok());
}

#[test]
fn test_first_conflict_is_reported() {
    let existing = vec![
        circle("far", lat_offset(500.0), 50.0),
        circle("near-a", lat_offset(60.0), 50.0),
        circle("near-b", lat_offset(90.0), 50.0),
    ];
    let candidate = circle("new", 0.0, 50.0);

    let rejection = validate_claim(&candidate, &existing).unwrap_err();
    // Scan order: the first conflicting circle in the slice wins.
    assert_eq!(rejection.conflicting_id, "near-a");
}

#[test]
fn test_touching_circles_do_not_overlap() {
    // Centers far enough that distance >= r1 + r2 holds comfortably.
    let existing = vec![circle("held", 0.0, 50.0)];
    let candidate = circle("new", lat_offset(101.0), 50.0);
    assert!(validate_claim(&candidate, &existing).is_ok());
}

#[test]
fn test_rejection_display() {
    let existing = vec![circle("held", 0.0, 50.0)];
    let candidate = circle("new", lat_offset(80.0), 50.0);
    let rejection = validate_claim(&candidate, &existing).unwrap_err();
    let text = rejection.to_string();
    assert!(text.contains("held"));
    assert!(text.contains("m apart"));
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use trailclaim::validate_claim_parallel;

    #[test]
    fn test_parallel_matches_sequential_verdict() {
        let existing: Vec<ClaimCircle> = (0..500)
            .map(|i| circle(&format!("claim-{i}"), lat_offset(300.0 * i as f64), 50.0))
            .collect();

        // Clearly overlapping with claim-0.
        let overlapping = circle("new", lat_offset(40.0), 50.0);
        assert!(validate_claim(&overlapping, &existing).is_err());
        assert!(validate_claim_parallel(&overlapping, &existing).is_err());

        // Midway between two well-separated claims.
        let free = circle("new", lat_offset(150.0), 50.0);
        assert!(validate_claim(&free, &existing).is_ok());
        assert!(validate_claim_parallel(&free, &existing).is_ok());
    }
}
