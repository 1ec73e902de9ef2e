use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParameterError, Result};
use crate::operations::count::CountPolicy;
use crate::operations::curvature::DEFAULT_CURVE_MARGIN;
use crate::operations::sampling::DEFAULT_RETRY_BUDGET;

/// Technical parameters of one sampling run.
///
/// Missing fields in a config file take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Carriageway width in metres.
    pub lane_width: f64,
    /// Minimum pavement area per sample in square metres.
    pub min_area: f64,
    /// Number of samples the caller asks for.
    pub target_count: u32,
    /// Minimum distance between two samples along the road, in metres.
    pub min_spacing: f64,
    /// Half-width of the band excluded around detected curves, in metres.
    pub curve_margin: f64,
    pub retry_budget: u32,
    pub count_policy: CountPolicy,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            lane_width: 7.0,
            min_area: 7000.0,
            target_count: 50,
            min_spacing: 320.0,
            curve_margin: DEFAULT_CURVE_MARGIN,
            retry_budget: DEFAULT_RETRY_BUDGET,
            count_policy: CountPolicy::default(),
        }
    }
}

impl SamplingParams {
    /// Checks every parameter before any geometric work starts.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        ParameterError::require_positive("lane_width", self.lane_width)?;
        ParameterError::require_positive("min_area", self.min_area)?;
        ParameterError::require_positive("min_spacing", self.min_spacing)?;
        ParameterError::require_non_negative("curve_margin", self.curve_margin)?;
        ParameterError::require_positive("target_count", f64::from(self.target_count))?;
        ParameterError::require_positive("retry_budget", f64::from(self.retry_budget))?;
        Ok(())
    }
}

/// Hashes the exact bit patterns of the parameters.
impl Hash for SamplingParams {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lane_width.to_bits().hash(state);
        self.min_area.to_bits().hash(state);
        self.target_count.hash(state);
        self.min_spacing.to_bits().hash(state);
        self.curve_margin.to_bits().hash(state);
        self.retry_budget.hash(state);
        self.count_policy.hash(state);
    }
}

/// Loads and validates sampling parameters from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, and
/// `ParameterError` if a value is out of range.
pub fn load_params(path: &Path) -> Result<SamplingParams> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let params: SamplingParams =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    params.validate()?;
    Ok(params)
}
