use serde::Serialize;

use crate::crs::{CrsId, LonLat};
use crate::math::Point2;
use crate::operations::offset::LateralRole;
use crate::operations::sampling::StopReason;

/// One audit sample, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    /// 1-based position in station order.
    pub index: u32,
    /// `"Amostra 01"`, `"Amostra 02"`, …
    pub label: String,
    pub role: LateralRole,
    /// Distance from the road start, in metres.
    pub station: f64,
    /// Offset point in the working CRS.
    pub projected: Point2,
    pub geographic: LonLat,
    /// Working CRS of `projected`.
    pub crs: CrsId,
}

impl SampleRecord {
    /// Label of the sample at 1-based `index`.
    #[must_use]
    pub fn label_for(index: u32) -> String {
        format!("Amostra {index:02}")
    }

    /// Station in kilometres.
    #[must_use]
    pub fn station_km(&self) -> f64 {
        self.station / 1000.0
    }

    /// Station formatted as on field sheets, e.g. `"km 1.234"`.
    #[must_use]
    pub fn station_label(&self) -> String {
        format!("km {:.3}", self.station_km())
    }

    /// Placemark name, e.g. `"Amostra 01 - Bordo Direito"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.label, self.role)
    }
}

/// Outcome of one sampling run.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRun {
    /// Samples in station order.
    pub records: Vec<SampleRecord>,
    /// Count the caller asked for.
    pub requested: u32,
    /// Regulatory minimum for this road and these parameters.
    pub minimum_count: u32,
    /// Count actually handed to the sampler after applying the policy.
    pub target: u32,
    pub attempts: u32,
    pub stop: StopReason,
    /// Road length in metres.
    pub road_length: f64,
    /// Number of curvature zones detected.
    pub curve_zones: usize,
}

impl SampleRun {
    /// Number of samples produced.
    #[must_use]
    pub fn achieved(&self) -> u32 {
        u32::try_from(self.records.len()).unwrap_or(u32::MAX)
    }

    /// Whether the sampler reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stop == StopReason::Filled
    }

    /// Whether the requested count is below the regulatory minimum.
    #[must_use]
    pub fn below_minimum(&self) -> bool {
        self.requested < self.minimum_count
    }
}
