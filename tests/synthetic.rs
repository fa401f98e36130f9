//! Tests for the synthetic walk generator
#![cfg(feature = "synthetic")]

use trailclaim::synthetic::{WalkPattern, WalkScenario};
use trailclaim::{ClaimEngine, GeoPoint, TrackConfig};

fn scenario(pattern: WalkPattern, noise: f64) -> WalkScenario {
    WalkScenario {
        origin: GeoPoint::new(47.37, 8.55),
        point_count: 100,
        step_meters: 12.0,
        pattern,
        gps_noise_sigma_meters: noise,
        seed: 42,
    }
}

#[test]
fn test_generator_is_deterministic() {
    let a = scenario(WalkPattern::Straight, 2.0).generate();
    let b = scenario(WalkPattern::Straight, 2.0).generate();
    assert_eq!(a, b);

    let other_seed = WalkScenario {
        seed: 43,
        ..scenario(WalkPattern::Straight, 2.0)
    }
    .generate();
    assert_ne!(a, other_seed);
}

#[test]
fn test_generator_point_count_and_validity() {
    let fixes = scenario(WalkPattern::ClosedLoop, 3.0).generate();
    assert_eq!(fixes.len(), 100);
    for fix in &fixes {
        assert!(fix.is_valid());
        assert!(fix.accuracy.unwrap() < 30.0);
    }
}

#[test]
fn test_figure_eight_walk_closes_a_loop() {
    let fixes = scenario(WalkPattern::FigureEight, 0.0).generate();

    let mut engine = ClaimEngine::new();
    engine.create_session("synthetic", TrackConfig::default()).unwrap();
    let mut accepted = 0;
    for fix in fixes {
        if engine
            .filter_and_append("synthetic", fix)
            .unwrap()
            .is_accepted()
        {
            accepted += 1;
        }
    }
    assert!(accepted > 90, "clean walk should mostly pass the filter");

    let loops = engine.poll_intersections("synthetic").unwrap();
    assert!(!loops.is_empty(), "figure-eight must cross itself");
    assert!(loops.iter().all(|l| l.area_m2 > 0.0));
}

#[test]
fn test_straight_walk_never_crosses() {
    let fixes = scenario(WalkPattern::Straight, 0.0).generate();

    let mut engine = ClaimEngine::new();
    engine.create_session("synthetic", TrackConfig::default()).unwrap();
    for fix in fixes {
        engine.filter_and_append("synthetic", fix).unwrap();
    }
    assert!(engine.poll_intersections("synthetic").unwrap().is_empty());
}
