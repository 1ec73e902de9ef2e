mod common;

use std::time::{Duration, Instant};

use common::{bend_road, straight_road};
use estaca::crs::UtmReprojector;
use estaca::error::{EstacaError, GeometryError};
use estaca::operations::curvature::CurveZones;
use estaca::operations::sampling::{StopReason, DEFAULT_RETRY_BUDGET};
use estaca::{
    compute_minimum_count, generate_samples, LateralRole, Reprojector, SamplingParams,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_test_writer()
        .try_init();
}

fn params(target_count: u32, min_spacing: f64) -> SamplingParams {
    SamplingParams {
        target_count,
        min_spacing,
        ..SamplingParams::default()
    }
}

#[test]
fn stations_are_pairwise_spaced_for_many_seeds() {
    init_tracing();
    let road = bend_road(200.0);
    let reprojector = UtmReprojector::new();
    for seed in 0..20 {
        let mut rng = Pcg64::seed_from_u64(seed);
        let run = generate_samples(&road, &params(12, 320.0), &reprojector, &mut rng)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        let stations: Vec<f64> = run.records.iter().map(|r| r.station).collect();
        assert!(stations.windows(2).all(|w| w[0] < w[1]), "seed {seed}: not ascending");
        for (i, a) in stations.iter().enumerate() {
            for b in &stations[i + 1..] {
                assert!(b - a >= 320.0, "seed {seed}: {a} and {b} closer than 320 m");
            }
        }
    }
}

#[test]
fn no_station_lies_in_a_curve_zone() {
    init_tracing();
    let road = bend_road(200.0);
    let zones = CurveZones::default()
        .execute(&road)
        .unwrap_or_else(|e| panic!("zones: {e}"));
    assert!(!zones.is_empty(), "bend should produce curve zones");

    let run = generate_samples(
        &road,
        &params(15, 250.0),
        &UtmReprojector::new(),
        &mut Pcg64::seed_from_u64(99),
    )
    .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(run.curve_zones, zones.len());
    for record in &run.records {
        for zone in zones.zones() {
            assert!(
                !(zone.start <= record.station && record.station <= zone.end),
                "station {} inside {zone:?}",
                record.station
            );
        }
    }
}

#[test]
fn roles_cycle_right_axis_left() {
    let run = generate_samples(
        &straight_road(30_000.0),
        &params(10, 320.0),
        &UtmReprojector::new(),
        &mut Pcg64::seed_from_u64(3),
    )
    .unwrap_or_else(|e| panic!("{e}"));
    let expected = [LateralRole::RightEdge, LateralRole::Axis, LateralRole::LeftEdge];
    for (i, record) in run.records.iter().enumerate() {
        assert_eq!(record.role, expected[i % 3], "record {i}");
    }
}

#[test]
fn regulatory_minimum_uses_ceiling() {
    assert_eq!(compute_minimum_count(1000.0, 7.0, 7000.0).ok(), Some(1));
    assert_eq!(compute_minimum_count(10_000.0, 7.0, 7000.0).ok(), Some(10));
}

#[test]
fn reprojection_round_trip_within_a_centimetre() {
    let reprojector = UtmReprojector::new();
    let run = generate_samples(
        &bend_road(200.0),
        &params(10, 300.0),
        &reprojector,
        &mut Pcg64::seed_from_u64(11),
    )
    .unwrap_or_else(|e| panic!("{e}"));
    for record in &run.records {
        let back = reprojector
            .to_projected(record.crs, record.geographic)
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(
            (back - record.projected).norm() < 0.01,
            "{} drifted {} m",
            record.label,
            (back - record.projected).norm()
        );
    }
}

#[test]
fn straight_road_edges_are_half_lane_from_axis() {
    let road = straight_road(10_000.0);
    let run = generate_samples(
        &road,
        &params(9, 320.0),
        &UtmReprojector::new(),
        &mut Pcg64::seed_from_u64(5),
    )
    .unwrap_or_else(|e| panic!("{e}"));
    let y0 = common::ORIGIN.1;
    for record in &run.records {
        let lateral = record.projected.y - y0;
        let expected = match record.role {
            LateralRole::RightEdge => 3.5,
            LateralRole::Axis => 0.0,
            LateralRole::LeftEdge => -3.5,
        };
        assert!((lateral - expected).abs() < 1e-6, "{lateral} vs {expected}");
        assert!((record.projected.x - common::ORIGIN.0 - record.station).abs() < 1e-6);
    }
}

#[test]
fn zero_length_road_is_rejected() {
    let err = generate_samples(
        &straight_road(0.0),
        &SamplingParams::default(),
        &UtmReprojector::new(),
        &mut Pcg64::seed_from_u64(0),
    )
    .err();
    assert!(matches!(
        err,
        Some(EstacaError::DegenerateGeometry(GeometryError::ZeroLength { .. }))
    ));
}

#[test]
fn spacing_longer_than_road_exhausts_budget_quickly() {
    init_tracing();
    let started = Instant::now();
    let run = generate_samples(
        &straight_road(800.0),
        &params(50, 1_000.0),
        &UtmReprojector::new(),
        &mut Pcg64::seed_from_u64(8),
    )
    .unwrap_or_else(|e| panic!("{e}"));
    assert!(run.achieved() <= 1);
    assert_eq!(run.stop, StopReason::BudgetExhausted);
    assert!(run.attempts <= DEFAULT_RETRY_BUDGET);
    assert!(started.elapsed() < Duration::from_secs(5));
}
