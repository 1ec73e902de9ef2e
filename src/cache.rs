use std::collections::hash_map::Entry;
use std::hash::{Hash, Hasher};

use fxhash::{FxHashMap, FxHasher};

use crate::config::SamplingParams;
use crate::error::Result;
use crate::geometry::RoadGeometry;
use crate::pipeline::SampleRun;

/// Content hash of a road and its sampling parameters.
#[must_use]
pub fn content_key(road: &RoadGeometry, params: &SamplingParams) -> u64 {
    let mut hasher = FxHasher::default();
    road.hash(&mut hasher);
    params.hash(&mut hasher);
    hasher.finish()
}

/// Caller-owned memo of sampling runs, keyed by [`content_key`].
///
/// Lets an interactive front end redisplay a run without resampling while
/// the road and parameters stay the same. Any change to either yields a new
/// key, so stale runs are never returned.
#[derive(Debug, Default)]
pub struct SampleCache {
    runs: FxHashMap<u64, SampleRun>,
}

impl SampleCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached run for this road and parameters.
    #[must_use]
    pub fn get(&self, road: &RoadGeometry, params: &SamplingParams) -> Option<&SampleRun> {
        self.runs.get(&content_key(road, params))
    }

    /// Stores a run, returning the one it replaced.
    pub fn insert(
        &mut self,
        road: &RoadGeometry,
        params: &SamplingParams,
        run: SampleRun,
    ) -> Option<SampleRun> {
        self.runs.insert(content_key(road, params), run)
    }

    /// Returns the cached run, or generates and stores one with `generate`.
    ///
    /// Nothing is stored when `generate` fails.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `generate`.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        road: &RoadGeometry,
        params: &SamplingParams,
        generate: F,
    ) -> Result<&SampleRun>
    where
        F: FnOnce() -> Result<SampleRun>,
    {
        match self.runs.entry(content_key(road, params)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                tracing::debug!(key = entry.key(), "sample cache miss");
                Ok(entry.insert(generate()?))
            }
        }
    }

    /// Drops the run for this road and parameters.
    pub fn invalidate(&mut self, road: &RoadGeometry, params: &SamplingParams) -> Option<SampleRun> {
        self.runs.remove(&content_key(road, params))
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
