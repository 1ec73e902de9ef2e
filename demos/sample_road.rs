//! Samples a synthetic road and prints the records as JSON lines.
//!
//! Usage:
//! ```text
//! cargo run --example sample_road                       # default parameters
//! cargo run --example sample_road -- params.json        # parameters from file
//! cargo run --example sample_road -- params.json 1234   # fixed seed
//! ```

use std::path::Path;

use estaca::crs::UtmReprojector;
use estaca::{
    generate_samples, load_params, LonLat, RoadGeometry, SampleCache, SamplingParams,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// A winding road west of Belo Horizonte, as decoded from a KML line.
fn demo_feature() -> Vec<LonLat> {
    vec![
        LonLat::new(-44.200, -19.950),
        LonLat::new(-44.170, -19.952),
        LonLat::new(-44.150, -19.945),
        LonLat::new(-44.135, -19.930),
        LonLat::new(-44.120, -19.925),
        LonLat::new(-44.090, -19.927),
        LonLat::new(-44.060, -19.935),
    ]
}

fn main() -> estaca::Result<()> {
    // Default: WARN for everything, INFO for estaca.
    // Override with RUST_LOG env var (e.g. RUST_LOG=estaca=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("estaca=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => load_params(Path::new(&path))?,
        None => SamplingParams::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x00e5_7aca);

    let reprojector = UtmReprojector::new();
    let road = RoadGeometry::from_line_features(&[demo_feature()], &reprojector)?;
    let mut rng = Pcg64::seed_from_u64(seed);

    let mut cache = SampleCache::new();
    let run = cache.get_or_try_insert_with(&road, &params, || {
        generate_samples(&road, &params, &reprojector, &mut rng)
    })?;

    if run.below_minimum() {
        tracing::warn!(
            requested = run.requested,
            minimum = run.minimum_count,
            "request below the IBRAOP minimum"
        );
    }

    for record in &run.records {
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(label = %record.label, "failed to encode record: {e}"),
        }
    }
    tracing::info!(
        achieved = run.achieved(),
        requested = run.requested,
        length_km = run.road_length / 1000.0,
        "done"
    );
    Ok(())
}
