//! Tests for geo_utils module

use trailclaim::geo_utils::*;
use trailclaim::GeoPoint;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_distance_same_point() {
    let p = GeoPoint::new(51.5074, -0.1278);
    assert_eq!(haversine_distance(&p, &p), 0.0);
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let london = GeoPoint::new(51.5074, -0.1278);
    let paris = GeoPoint::new(48.8566, 2.3522);
    let dist = haversine_distance(&london, &paris);
    assert!(approx_eq(dist, 343_560.0, 5_000.0)); // Within 5km
}

#[test]
fn test_haversine_distance_symmetric() {
    let a = GeoPoint::new(47.3769, 8.5417);
    let b = GeoPoint::new(46.9480, 7.4474);
    let ab = haversine_distance(&a, &b);
    let ba = haversine_distance(&b, &a);
    assert!(approx_eq(ab, ba, 1e-9));
}

#[test]
fn test_haversine_distance_antipodal_is_finite() {
    // The clamp keeps the intermediate inside asin's domain.
    let a = GeoPoint::new(0.0, 0.0);
    let b = GeoPoint::new(0.0, 180.0);
    let dist = haversine_distance(&a, &b);
    assert!(dist.is_finite());
    // Half the circumference of a 6371 km sphere.
    assert!(approx_eq(dist, 20_015_086.0, 10_000.0));
}

#[test]
fn test_haversine_distance_tiny_separation() {
    let a = GeoPoint::new(51.5074, -0.1278);
    let b = GeoPoint::new(51.50740001, -0.12780001);
    let dist = haversine_distance(&a, &b);
    assert!(dist.is_finite());
    assert!(dist >= 0.0);
    assert!(dist < 0.01);
}

#[test]
fn test_meters_to_degrees() {
    // At equator, 111.32 km = 1 degree
    let deg = meters_to_degrees(111_320.0, 0.0);
    assert!(approx_eq(deg, 1.0, 0.01));

    // At higher latitude, same distance = more degrees of longitude
    let deg_45 = meters_to_degrees(111_320.0, 45.0);
    assert!(deg_45 > 1.0);
}

#[test]
fn test_project_to_meters_north() {
    let reference = GeoPoint::new(47.0, 8.0);
    let north = GeoPoint::new(47.0 + 100.0 / 111_320.0, 8.0);
    let (x, y) = project_to_meters(&north, &reference);
    assert!(approx_eq(x, 0.0, 1e-6));
    assert!(approx_eq(y, 100.0, 0.01));
}

#[test]
fn test_project_to_meters_east_shrinks_with_latitude() {
    let equator_ref = GeoPoint::new(0.0, 8.0);
    let alpine_ref = GeoPoint::new(47.0, 8.0);
    let east_eq = GeoPoint::new(0.0, 8.001);
    let east_alp = GeoPoint::new(47.0, 8.001);

    let (x_eq, _) = project_to_meters(&east_eq, &equator_ref);
    let (x_alp, _) = project_to_meters(&east_alp, &alpine_ref);
    assert!(x_alp < x_eq);
    assert!(x_alp > 0.0);
}

#[test]
fn test_compute_bounds() {
    let track = vec![
        GeoPoint::new(51.50, -0.13),
        GeoPoint::new(51.51, -0.12),
        GeoPoint::new(51.505, -0.125),
    ];
    let bounds = compute_bounds(&track);
    assert_eq!(bounds.min_lat, 51.50);
    assert_eq!(bounds.max_lat, 51.51);
    assert_eq!(bounds.min_lng, -0.13);
    assert_eq!(bounds.max_lng, -0.12);
}

#[test]
fn test_compute_center() {
    let track = vec![GeoPoint::new(51.50, -0.10), GeoPoint::new(51.52, -0.12)];
    let center = compute_center(&track);
    assert!(approx_eq(center.latitude, 51.51, 0.001));
    assert!(approx_eq(center.longitude, -0.11, 0.001));
}

#[test]
fn test_compute_center_empty() {
    let empty: Vec<GeoPoint> = vec![];
    let center = compute_center(&empty);
    assert_eq!(center.latitude, 0.0);
    assert_eq!(center.longitude, 0.0);
}

#[test]
fn test_track_length() {
    let step = 100.0 / 111_320.0;
    let track = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(step, 0.0),
        GeoPoint::new(2.0 * step, 0.0),
    ];
    let length = track_length(&track);
    assert!(approx_eq(length, 200.0, 1.0));
}

#[test]
fn test_track_length_degenerate() {
    assert_eq!(track_length(&[]), 0.0);
    assert_eq!(track_length(&[GeoPoint::new(1.0, 1.0)]), 0.0);
}
