mod zone_set;

pub use zone_set::{ForbiddenZone, ZoneSet};

use crate::error::{ParameterError, Result};
use crate::geometry::LinearGeometry;
use crate::math::vector_2d::turn_cosine;

/// Default half-width, in metres, of the band excluded around a curve sample.
pub const DEFAULT_CURVE_MARGIN: f64 = 150.0;

/// Spacing, in metres, of the probes used to measure heading changes.
pub const DEFAULT_PROBE_STEP: f64 = 10.0;

/// Turning cosine below which a probe counts as "inside a curve".
///
/// `0.9995` is a heading change of about 1.8° over one probe step.
pub const DEFAULT_STRAIGHT_COSINE: f64 = 0.9995;

/// Detects curvature zones along a centerline.
///
/// Probes the line every `step` metres. At each interior probe `d` the
/// heading change between `p(d - step) → p(d)` and `p(d) → p(d + step)` is
/// measured; when its cosine drops below the threshold, the band
/// `[d - margin, d + margin]` is emitted. Bands are not merged and may
/// overlap or overhang the road ends.
///
/// This is a discrete heuristic, not an exact curvature: it only biases
/// sampling away from bends, where lateral offsets behave poorly.
#[derive(Debug, Clone)]
pub struct CurveZones {
    margin: f64,
    step: f64,
    threshold: f64,
}

impl CurveZones {
    /// Creates a detector with the given margin and default probing.
    #[must_use]
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            step: DEFAULT_PROBE_STEP,
            threshold: DEFAULT_STRAIGHT_COSINE,
        }
    }

    /// Overrides the probe step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Overrides the straightness threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Scans `line` and returns the detected zones.
    ///
    /// A line no longer than two probe steps has no interior probe and
    /// yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` if the margin is negative or the step is not
    /// strictly positive.
    pub fn execute(&self, line: &impl LinearGeometry) -> Result<ZoneSet> {
        ParameterError::require_non_negative("curve_margin", self.margin)?;
        ParameterError::require_positive("curve_probe_step", self.step)?;

        let length = line.length();
        if length <= 2.0 * self.step {
            return Ok(ZoneSet::empty());
        }

        // Probes run over whole metres of length, excluding the last step.
        let limit = length.floor() - self.step;
        let mut zones = Vec::new();
        let mut probes = 0_u32;
        for k in 1_u32.. {
            let d = f64::from(k) * self.step;
            if d >= limit {
                break;
            }
            probes += 1;
            let prev = line.point_at(d - self.step);
            let here = line.point_at(d);
            let next = line.point_at(d + self.step);
            match turn_cosine(&prev, &here, &next) {
                Some(cos) if cos < self.threshold => {
                    zones.push(ForbiddenZone::around(d, self.margin));
                }
                _ => {}
            }
        }

        tracing::debug!(probes, zones = zones.len(), "scanned centerline for curves");
        Ok(ZoneSet::new(zones))
    }
}

impl Default for CurveZones {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_MARGIN)
    }
}
