//! End-to-end sampling run.
//!
//! ```text
//! RoadGeometry ─┬─ compute_minimum_count ── CountPolicy ─┐
//!               └─ CurveZones ───────────────────────────┴─ DistanceSampler
//!                                                              │
//!                              Reprojector ◄── LateralOffset ◄─┘
//! ```

mod record;

pub use record::{SampleRecord, SampleRun};

use rand::Rng;

use crate::config::SamplingParams;
use crate::crs::Reprojector;
use crate::error::Result;
use crate::geometry::RoadGeometry;
use crate::operations::count::compute_minimum_count;
use crate::operations::curvature::CurveZones;
use crate::operations::offset::LateralOffset;
use crate::operations::sampling::{CancellationCheck, DistanceSampler, NeverCancel};

/// Samples audit points along `road`.
///
/// Parameters and geometry are checked before any sampling work. The run
/// may produce fewer records than its target; see [`SampleRun::achieved`].
///
/// # Errors
///
/// - `InvalidParameter` for out-of-range parameters.
/// - `DegenerateGeometry` for a road too short to sample or a station whose
///   direction cannot be determined.
/// - `ReprojectionFailure` if a point cannot be transformed to WGS84.
pub fn generate_samples<P, R>(
    road: &RoadGeometry,
    params: &SamplingParams,
    reprojector: &P,
    rng: &mut R,
) -> Result<SampleRun>
where
    P: Reprojector + ?Sized,
    R: Rng + ?Sized,
{
    generate_samples_with(road, params, reprojector, rng, &NeverCancel)
}

/// Like [`generate_samples`], polling `cancel` before every sampling attempt.
///
/// # Errors
///
/// See [`generate_samples`].
pub fn generate_samples_with<P, R, C>(
    road: &RoadGeometry,
    params: &SamplingParams,
    reprojector: &P,
    rng: &mut R,
    cancel: &C,
) -> Result<SampleRun>
where
    P: Reprojector + ?Sized,
    R: Rng + ?Sized,
    C: CancellationCheck + ?Sized,
{
    params.validate()?;
    let length = road.sampling_length()?;

    let minimum_count = compute_minimum_count(length, params.lane_width, params.min_area)?;
    let target = params.count_policy.resolve(params.target_count, minimum_count);
    if params.target_count < minimum_count {
        tracing::warn!(
            requested = params.target_count,
            minimum_count,
            policy = ?params.count_policy,
            "requested sample count is below the regulatory minimum"
        );
    }

    let zones = CurveZones::new(params.curve_margin).execute(road)?;
    tracing::debug!(
        length,
        zones = zones.len(),
        covered = zones.covered_length(length),
        "curvature zones"
    );

    let sampled = DistanceSampler::new(length, target, params.min_spacing, &zones)
        .with_retry_budget(params.retry_budget)
        .execute_with(rng, cancel)?;

    let crs = road.crs();
    let records = LateralOffset::new(params.lane_width)
        .execute(road, &sampled.stations)?
        .into_iter()
        .map(|placed| -> Result<SampleRecord> {
            let index = u32::try_from(placed.position + 1).unwrap_or(u32::MAX);
            Ok(SampleRecord {
                index,
                label: SampleRecord::label_for(index),
                role: placed.role,
                station: placed.station,
                geographic: reprojector.to_geographic(crs, &placed.point)?,
                projected: placed.point,
                crs,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        %crs,
        achieved = records.len(),
        target,
        minimum_count,
        "generated samples"
    );

    Ok(SampleRun {
        records,
        requested: params.target_count,
        minimum_count,
        target,
        attempts: sampled.attempts,
        stop: sampled.stop,
        road_length: length,
        curve_zones: zones.len(),
    })
}
