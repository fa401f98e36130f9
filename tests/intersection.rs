//! Tests for self-intersection detection

use trailclaim::{
    find_loop_intersections, segment_intersection, GeoPoint, SegmentCrossing, TrackConfig,
};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

const EPSILON: f64 = 1e-10;

#[test]
fn test_crossing_segments_hit() {
    // Two diagonals of a small square cross at its center.
    let a1 = GeoPoint::new(0.0, 0.0);
    let a2 = GeoPoint::new(0.001, 0.001);
    let b1 = GeoPoint::new(0.001, 0.0);
    let b2 = GeoPoint::new(0.0, 0.001);

    match segment_intersection(&a1, &a2, &b1, &b2, EPSILON) {
        SegmentCrossing::Hit { point, t, u } => {
            assert!(approx_eq(point.latitude, 0.0005, 1e-9));
            assert!(approx_eq(point.longitude, 0.0005, 1e-9));
            assert!(approx_eq(t, 0.5, 1e-9));
            assert!(approx_eq(u, 0.5, 1e-9));
        }
        SegmentCrossing::Miss => panic!("diagonals must cross"),
    }
}

#[test]
fn test_parallel_segments_miss() {
    let a1 = GeoPoint::new(0.0, 0.0);
    let a2 = GeoPoint::new(0.0, 0.001);
    let b1 = GeoPoint::new(0.0005, 0.0);
    let b2 = GeoPoint::new(0.0005, 0.001);

    assert_eq!(
        segment_intersection(&a1, &a2, &b1, &b2, EPSILON),
        SegmentCrossing::Miss
    );
}

#[test]
fn test_nonoverlapping_segments_miss() {
    // Lines cross but the segments end before reaching each other.
    let a1 = GeoPoint::new(0.0, 0.0);
    let a2 = GeoPoint::new(0.0001, 0.0001);
    let b1 = GeoPoint::new(0.001, 0.0);
    let b2 = GeoPoint::new(0.0009, 0.0001);

    assert_eq!(
        segment_intersection(&a1, &a2, &b1, &b2, EPSILON),
        SegmentCrossing::Miss
    );
}

#[test]
fn test_straight_path_has_no_loops() {
    let config = TrackConfig::default();
    let points: Vec<GeoPoint> = (0..10)
        .map(|i| GeoPoint::new(0.0005 * i as f64, 0.0001 * i as f64))
        .collect();
    assert!(find_loop_intersections(&points, &config).is_empty());
}

#[test]
fn test_short_path_skips_scan() {
    let config = TrackConfig::default();
    let points = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0005, 0.0005),
        GeoPoint::new(0.0005, 0.0),
    ];
    assert!(find_loop_intersections(&points, &config).is_empty());
}

#[test]
fn test_figure_eight_reports_one_loop() {
    let config = TrackConfig::default();
    // First and third segments cross at (0.00025, 0.00025).
    let points = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0005, 0.0005),
        GeoPoint::new(0.0005, 0.0),
        GeoPoint::new(0.0, 0.0005),
    ];

    let loops = find_loop_intersections(&points, &config);
    assert_eq!(loops.len(), 1);

    let hit = &loops[0];
    assert_eq!(hit.segment_start, 0);
    assert_eq!(hit.segment_end, 2);
    assert!(approx_eq(hit.point.latitude, 0.00025, 1e-9));
    assert!(approx_eq(hit.point.longitude, 0.00025, 1e-9));

    // Ring is the crossing point, the enclosed points, and the
    // crossing point again.
    assert_eq!(hit.ring.len(), 4);
    assert_eq!(hit.ring.first(), hit.ring.last());
    assert_eq!(hit.ring[1], points[1]);
    assert_eq!(hit.ring[2], points[2]);

    // Enclosed triangle is roughly 775 m² at this scale.
    assert!(hit.area_m2 > 700.0 && hit.area_m2 < 850.0);
}

#[test]
fn test_adjacent_segments_are_not_tested() {
    let config = TrackConfig::default();
    // A sharp switchback: consecutive segments share endpoints but
    // never count as crossings.
    let points = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0005, 0.0),
        GeoPoint::new(0.0, 0.0001),
        GeoPoint::new(0.0005, 0.0002),
    ];
    let loops = find_loop_intersections(&points, &config);
    assert!(loops.is_empty());
}

#[test]
fn test_multiple_crossings_reported_in_segment_order() {
    let config = TrackConfig::default();
    // A zigzag over a long baseline: the final return segment crosses
    // several earlier segments; every hit is reported, earliest first.
    let points = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0004, 0.0002),
        GeoPoint::new(-0.0004, 0.0004),
        GeoPoint::new(0.0004, 0.0006),
        GeoPoint::new(-0.0004, 0.0008),
        GeoPoint::new(0.0001, 0.0),
    ];

    let loops = find_loop_intersections(&points, &config);
    assert!(loops.len() >= 2, "expected several crossings, got {}", loops.len());

    let mut last = (0, 0);
    for hit in &loops {
        assert!((hit.segment_start, hit.segment_end) > last);
        last = (hit.segment_start, hit.segment_end);
        assert!(hit.area_m2 >= 0.0);
        assert_eq!(hit.ring.first(), hit.ring.last());
    }
}
