mod cancel;

pub use cancel::{CancelFlag, CancellationCheck, Deadline, NeverCancel};

use rand::Rng;
use serde::Serialize;

use crate::error::{ParameterError, Result};

use super::curvature::ZoneSet;

/// Default number of draws before the sampler gives up.
pub const DEFAULT_RETRY_BUDGET: u32 = 60_000;

/// Why a sampling run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The requested count was reached.
    Filled,
    /// The retry budget ran out first.
    BudgetExhausted,
    /// The cancellation hook fired first.
    Cancelled,
}

/// Stations accepted by a [`DistanceSampler`] run.
///
/// `stations` may hold fewer than `requested` entries; the achieved count is
/// authoritative.
#[derive(Debug, Clone, Serialize)]
pub struct SampledStations {
    /// Accepted stations in ascending order.
    pub stations: Vec<f64>,
    pub requested: u32,
    /// Number of random draws performed.
    pub attempts: u32,
    pub stop: StopReason,
}

impl SampledStations {
    /// Number of stations accepted.
    #[must_use]
    pub fn achieved(&self) -> u32 {
        u32::try_from(self.stations.len()).unwrap_or(u32::MAX)
    }

    /// Whether the requested count was reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stop == StopReason::Filled
    }
}

/// Bounded rejection sampling of stations along a road.
///
/// Each attempt draws a station uniformly in `[0, length]`, rejects it when it
/// falls inside a forbidden zone or closer than `min_spacing` to an accepted
/// station, and accepts it otherwise. Sampling stops once `target` stations
/// are accepted, the retry budget is spent, or the cancellation hook fires.
///
/// Accepted stations are kept sorted, so the spacing test only looks at the
/// two neighbours of the insertion point.
#[derive(Debug)]
pub struct DistanceSampler<'z> {
    length: f64,
    target: u32,
    min_spacing: f64,
    zones: &'z ZoneSet,
    retry_budget: u32,
}

impl<'z> DistanceSampler<'z> {
    /// Creates a sampler with the default retry budget.
    #[must_use]
    pub fn new(length: f64, target: u32, min_spacing: f64, zones: &'z ZoneSet) -> Self {
        Self {
            length,
            target,
            min_spacing,
            zones,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    /// Overrides the retry budget.
    #[must_use]
    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Runs the sampler to completion or budget exhaustion.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` if the length or spacing is not strictly
    /// positive, or the target count or budget is zero.
    pub fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SampledStations> {
        self.execute_with(rng, &NeverCancel)
    }

    /// Like [`Self::execute`], polling `cancel` before every attempt.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn execute_with<R, C>(&self, rng: &mut R, cancel: &C) -> Result<SampledStations>
    where
        R: Rng + ?Sized,
        C: CancellationCheck + ?Sized,
    {
        self.validate()?;

        let target = usize::try_from(self.target).unwrap_or(usize::MAX);
        let mut accepted: Vec<f64> = Vec::with_capacity(target.min(4096));
        let mut attempts = 0_u32;

        let stop = loop {
            if accepted.len() >= target {
                break StopReason::Filled;
            }
            if attempts >= self.retry_budget {
                break StopReason::BudgetExhausted;
            }
            if cancel.is_cancelled(attempts) {
                break StopReason::Cancelled;
            }
            attempts += 1;

            let station = rng.gen_range(0.0..=self.length);
            if self.zones.contains(station) {
                continue;
            }
            let idx = accepted.partition_point(|&a| a < station);
            let clear_before = idx == 0 || station - accepted[idx - 1] >= self.min_spacing;
            let clear_after = idx == accepted.len() || accepted[idx] - station >= self.min_spacing;
            if clear_before && clear_after {
                accepted.insert(idx, station);
            }
        };

        let result = SampledStations {
            stations: accepted,
            requested: self.target,
            attempts,
            stop,
        };
        if result.is_complete() {
            tracing::debug!(achieved = result.achieved(), attempts, "sampled stations");
        } else {
            tracing::warn!(
                achieved = result.achieved(),
                requested = self.target,
                attempts,
                ?stop,
                "sampler stopped short of the requested count"
            );
        }
        Ok(result)
    }

    fn validate(&self) -> Result<()> {
        ParameterError::require_positive("length", self.length)?;
        ParameterError::require_positive("min_spacing", self.min_spacing)?;
        if self.target == 0 {
            return Err(ParameterError {
                name: "target_count",
                value: 0.0,
                requirement: "must be > 0",
            }
            .into());
        }
        if self.retry_budget == 0 {
            return Err(ParameterError {
                name: "retry_budget",
                value: 0.0,
                requirement: "must be > 0",
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::EstacaError;
    use crate::operations::curvature::ForbiddenZone;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::cell::Cell;
    use std::sync::atomic::AtomicBool;

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(0x5eed)
    }

    fn assert_spacing(stations: &[f64], min_spacing: f64) {
        for (i, a) in stations.iter().enumerate() {
            for b in &stations[i + 1..] {
                assert!((a - b).abs() >= min_spacing, "{a} and {b} too close");
            }
        }
    }

    #[test]
    fn fills_target_on_unconstrained_road() {
        let zones = ZoneSet::empty();
        let out = DistanceSampler::new(50_000.0, 20, 320.0, &zones)
            .execute(&mut rng())
            .unwrap();
        assert_eq!(out.stop, StopReason::Filled);
        assert_eq!(out.achieved(), 20);
        assert!(out.stations.windows(2).all(|w| w[0] < w[1]));
        assert!(out.stations.iter().all(|&d| (0.0..=50_000.0).contains(&d)));
        assert_spacing(&out.stations, 320.0);
    }

    #[test]
    fn avoids_forbidden_zones() {
        let zones = ZoneSet::new(vec![
            ForbiddenZone::new(-150.0, 2_000.0),
            ForbiddenZone::new(4_000.0, 6_000.0),
            ForbiddenZone::new(5_500.0, 7_500.0),
        ]);
        let out = DistanceSampler::new(10_000.0, 8, 200.0, &zones)
            .execute(&mut rng())
            .unwrap();
        assert_eq!(out.achieved(), 8);
        for d in &out.stations {
            for z in zones.zones() {
                assert!(!z.contains(*d), "{d} inside {z:?}");
            }
        }
        assert_spacing(&out.stations, 200.0);
    }

    #[test]
    fn spacing_longer_than_road_yields_at_most_one() {
        let zones = ZoneSet::empty();
        let out = DistanceSampler::new(500.0, 10, 1_000.0, &zones)
            .execute(&mut rng())
            .unwrap();
        assert_eq!(out.achieved(), 1);
        assert_eq!(out.stop, StopReason::BudgetExhausted);
        assert_eq!(out.attempts, DEFAULT_RETRY_BUDGET);
    }

    #[test]
    fn fully_forbidden_road_yields_nothing() {
        let zones = ZoneSet::new(vec![ForbiddenZone::new(-10.0, 1_010.0)]);
        let out = DistanceSampler::new(1_000.0, 3, 10.0, &zones)
            .with_retry_budget(500)
            .execute(&mut rng())
            .unwrap();
        assert!(out.stations.is_empty());
        assert_eq!(out.attempts, 500);
        assert!(!out.is_complete());
    }

    #[test]
    fn same_seed_same_stations() {
        let zones = ZoneSet::empty();
        let sampler = DistanceSampler::new(20_000.0, 15, 300.0, &zones);
        let a = sampler.execute(&mut rng()).unwrap();
        let b = sampler.execute(&mut rng()).unwrap();
        assert_eq!(a.stations, b.stations);
    }

    #[test]
    fn closure_cancels_after_given_attempts() {
        let zones = ZoneSet::empty();
        let seen = Cell::new(0_u32);
        let cancel = |attempt: u32| {
            seen.set(attempt);
            attempt >= 3
        };
        let out = DistanceSampler::new(500.0, 10, 1_000.0, &zones)
            .execute_with(&mut rng(), &cancel)
            .unwrap();
        assert_eq!(out.stop, StopReason::Cancelled);
        assert_eq!(out.attempts, 3);
        assert_eq!(seen.get(), 3);
        assert_eq!(out.achieved(), 1);
    }

    #[test]
    fn raised_flag_cancels_before_first_attempt() {
        let zones = ZoneSet::empty();
        let flag = AtomicBool::new(true);
        let out = DistanceSampler::new(5_000.0, 10, 10.0, &zones)
            .execute_with(&mut rng(), &CancelFlag(&flag))
            .unwrap();
        assert_eq!(out.stop, StopReason::Cancelled);
        assert_eq!(out.attempts, 0);
        assert!(out.stations.is_empty());
    }

    #[test]
    fn zero_target_is_invalid() {
        let zones = ZoneSet::empty();
        let err = DistanceSampler::new(1_000.0, 0, 10.0, &zones)
            .execute(&mut rng())
            .unwrap_err();
        assert!(matches!(err, EstacaError::InvalidParameter(_)));
    }

    #[test]
    fn non_positive_spacing_is_invalid() {
        let zones = ZoneSet::empty();
        let err = DistanceSampler::new(1_000.0, 3, 0.0, &zones)
            .execute(&mut rng())
            .unwrap_err();
        assert!(err.to_string().contains("min_spacing"), "{err}");
    }
}
