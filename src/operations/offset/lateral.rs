use crate::error::{GeometryError, ParameterError, Result};
use crate::geometry::LinearGeometry;
use crate::math::vector_2d::left_normal;
use crate::math::Point2;

use super::LateralRole;

/// Arc-length step, in metres, used to estimate the local road direction.
pub const TANGENT_PROBE: f64 = 0.1;

/// A station placed at its lateral position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetStation {
    /// 0-based position in station order.
    pub position: usize,
    pub role: LateralRole,
    pub station: f64,
    pub point: Point2,
}

/// Places stations across the carriageway.
///
/// Roles cycle `RightEdge → Axis → LeftEdge` by position. Each point is
/// `p(d) + offset * n`, where `n` is the unit left-hand normal of the
/// direction from `p(d)` to `p(d + TANGENT_PROBE)` and `offset` is
/// `+half_width`, `0` or `-half_width` for the role.
#[derive(Debug, Clone)]
pub struct LateralOffset {
    half_width: f64,
}

impl LateralOffset {
    /// Creates a projector for a carriageway of `lane_width` metres.
    #[must_use]
    pub fn new(lane_width: f64) -> Self {
        Self {
            half_width: lane_width / 2.0,
        }
    }

    /// Offsets every station, in order.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` for a non-positive lane width and
    /// `GeometryError::ZeroTangent` when the direction at a station
    /// cannot be determined.
    pub fn execute(
        &self,
        line: &impl LinearGeometry,
        stations: &[f64],
    ) -> Result<Vec<OffsetStation>> {
        ParameterError::require_positive("lane_width", self.half_width * 2.0)?;
        stations
            .iter()
            .enumerate()
            .map(|(position, &station)| -> Result<OffsetStation> {
                let role = LateralRole::for_position(position);
                Ok(OffsetStation {
                    position,
                    role,
                    station,
                    point: self.point_at(line, station, role)?,
                })
            })
            .collect()
    }

    /// Offsets a single station for the given role.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroTangent` when the direction at `station`
    /// cannot be determined.
    pub fn point_at(
        &self,
        line: &impl LinearGeometry,
        station: f64,
        role: LateralRole,
    ) -> Result<Point2> {
        let base = line.point_at(station);
        let length = line.length();
        // Near the end, look back instead of probing past a clamped endpoint.
        let (from, to) = if station + TANGENT_PROBE <= length {
            (base, line.point_at(station + TANGENT_PROBE))
        } else {
            (line.point_at(length - TANGENT_PROBE), line.point_at(length))
        };
        let normal = left_normal(&(to - from)).ok_or(GeometryError::ZeroTangent { station })?;
        Ok(base + normal * role.offset(self.half_width))
    }
}
