mod polyline;
mod road;

pub use polyline::Polyline2D;
pub use road::RoadGeometry;

use crate::math::Point2;

/// An arc-length parametrized curve in a projected plane.
///
/// Distances are measured in the units of the working CRS (metres) from the
/// start of the curve.
pub trait LinearGeometry {
    /// Total arc length of the curve.
    fn length(&self) -> f64;

    /// Returns the point at arc length `distance`.
    ///
    /// Distances outside `[0, length]` are clamped to the nearest endpoint.
    fn point_at(&self, distance: f64) -> Point2;
}

impl<G: LinearGeometry + ?Sized> LinearGeometry for &G {
    fn length(&self) -> f64 {
        (**self).length()
    }

    fn point_at(&self, distance: f64) -> Point2 {
        (**self).point_at(distance)
    }
}
