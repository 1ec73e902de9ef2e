use std::hash::{Hash, Hasher};

use crate::crs::{CrsId, LonLat, Reprojector, UtmZone};
use crate::error::{GeometryError, InputError, ProjectionError, Result};
use crate::math::Point2;

use super::{LinearGeometry, Polyline2D};

/// Shortest road length, in metres, that can be sampled.
pub const MIN_ROAD_LENGTH: f64 = 1e-3;

/// A road centerline in a projected working CRS.
///
/// The geometry is immutable once built; sampling runs borrow it read-only.
#[derive(Debug, Clone)]
pub struct RoadGeometry {
    line: Polyline2D,
    crs: CrsId,
}

impl RoadGeometry {
    /// Wraps an already projected centerline.
    #[must_use]
    pub fn new(line: Polyline2D, crs: CrsId) -> Self {
        Self { line, crs }
    }

    /// Builds a road from projected vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError` if the vertices do not form a valid polyline.
    pub fn from_projected(vertices: Vec<Point2>, crs: CrsId) -> Result<Self> {
        Ok(Self::new(Polyline2D::new(vertices)?, crs))
    }

    /// Builds a road from a WGS84 line, projecting it into the UTM zone
    /// selected from the line's extent.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError` if no zone can be selected or a vertex cannot
    /// be projected, and `GeometryError` for an invalid polyline.
    pub fn from_geographic(line: &[LonLat], reprojector: &impl Reprojector) -> Result<Self> {
        let zone = UtmZone::for_extent(line).ok_or_else(|| {
            let first = line.first().copied().unwrap_or(LonLat::new(f64::NAN, f64::NAN));
            ProjectionError::OutOfDomain {
                crs: CrsId::WGS84,
                lon: first.lon,
                lat: first.lat,
            }
        })?;
        let crs = zone.crs();
        let vertices = line
            .iter()
            .map(|&p| reprojector.to_projected(crs, p))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(%crs, vertices = vertices.len(), "projected road centerline");
        Self::from_projected(vertices, crs)
    }

    /// Builds a road from the linear features a file loader decoded.
    ///
    /// Exactly one feature must be present.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoLineFeature` or `InputError::MultipleLineFeatures`
    /// when the feature count is not one, then as [`Self::from_geographic`].
    pub fn from_line_features(
        features: &[Vec<LonLat>],
        reprojector: &impl Reprojector,
    ) -> Result<Self> {
        match features {
            [] => Err(InputError::NoLineFeature.into()),
            [line] => Self::from_geographic(line, reprojector),
            many => Err(InputError::MultipleLineFeatures(many.len()).into()),
        }
    }

    /// Returns the centerline.
    #[must_use]
    pub fn line(&self) -> &Polyline2D {
        &self.line
    }

    /// Returns the working CRS of the centerline.
    #[must_use]
    pub fn crs(&self) -> CrsId {
        self.crs
    }

    /// Returns the road length, rejecting roads too short to sample.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLength` if the length is below
    /// [`MIN_ROAD_LENGTH`].
    pub fn sampling_length(&self) -> Result<f64> {
        let length = self.line.length();
        if length < MIN_ROAD_LENGTH {
            return Err(GeometryError::ZeroLength { length }.into());
        }
        Ok(length)
    }
}

impl LinearGeometry for RoadGeometry {
    fn length(&self) -> f64 {
        self.line.length()
    }

    fn point_at(&self, distance: f64) -> Point2 {
        self.line.point_at(distance)
    }
}

/// Hashes the exact vertex coordinates and CRS.
impl Hash for RoadGeometry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.crs.hash(state);
        self.line.vertices().len().hash(state);
        for p in self.line.vertices() {
            p.x.to_bits().hash(state);
            p.y.to_bits().hash(state);
        }
    }
}
