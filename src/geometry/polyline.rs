use crate::error::{GeometryError, Result};
use crate::math::Point2;

use super::LinearGeometry;

/// An open polyline of straight segments, parametrized by arc length.
///
/// Cumulative vertex distances are computed once at construction so that
/// [`LinearGeometry::point_at`] is a binary search plus one interpolation.
#[derive(Debug, Clone)]
pub struct Polyline2D {
    vertices: Vec<Point2>,
    /// `cumulative[i]` is the arc length from vertex 0 to vertex `i`.
    cumulative: Vec<f64>,
}

impl Polyline2D {
    /// Creates a polyline from its vertices.
    ///
    /// Repeated vertices are allowed; they contribute zero-length segments.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewVertices` for fewer than 2 vertices and
    /// `GeometryError::NonFiniteVertex` for NaN or infinite coordinates.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::TooFewVertices(vertices.len()).into());
        }
        if let Some(index) = vertices
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFiniteVertex { index }.into());
        }

        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in vertices.windows(2) {
            total += (pair[1] - pair[0]).norm();
            cumulative.push(total);
        }

        Ok(Self {
            vertices,
            cumulative,
        })
    }

    /// Returns the polyline vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.vertices.len() - 1
    }
}

impl LinearGeometry for Polyline2D {
    fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, distance: f64) -> Point2 {
        let d = if distance.is_nan() {
            0.0
        } else {
            distance.clamp(0.0, self.length())
        };

        // First vertex strictly beyond `d`; the segment ends there.
        let upper = self.cumulative.partition_point(|&c| c <= d);
        let i = upper.clamp(1, self.vertices.len() - 1) - 1;

        let start = self.vertices[i];
        let seg_len = self.cumulative[i + 1] - self.cumulative[i];
        if seg_len <= 0.0 {
            return start;
        }
        let t = ((d - self.cumulative[i]) / seg_len).clamp(0.0, 1.0);
        start + (self.vertices[i + 1] - start) * t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::EstacaError;
    use approx::assert_abs_diff_eq;

    fn l_shape() -> Polyline2D {
        Polyline2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn length_sums_segments() {
        let line = l_shape();
        assert_abs_diff_eq!(line.length(), 150.0, epsilon = 1e-12);
        assert_eq!(line.segment_count(), 2);
    }

    #[test]
    fn point_at_interpolates_within_segments() {
        let line = l_shape();
        let p = line.point_at(40.0);
        assert_abs_diff_eq!(p.x, 40.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);

        let q = line.point_at(125.0);
        assert_abs_diff_eq!(q.x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.y, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn point_at_vertex_and_endpoints() {
        let line = l_shape();
        assert_abs_diff_eq!(line.point_at(100.0).x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.point_at(100.0).y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.point_at(0.0).x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.point_at(150.0).y, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn point_at_clamps_out_of_range() {
        let line = l_shape();
        let before = line.point_at(-20.0);
        let after = line.point_at(1e6);
        assert_abs_diff_eq!(before.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(after.x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(after.y, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn repeated_vertices_are_skipped() {
        let line = Polyline2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(20.0, 0.0),
        ])
        .unwrap();
        assert_abs_diff_eq!(line.length(), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.point_at(15.0).x, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_polyline_returns_its_point() {
        let p = Point2::new(7.0, 8.0);
        let line = Polyline2D::new(vec![p, p]).unwrap();
        assert_abs_diff_eq!(line.length(), 0.0);
        assert_eq!(line.point_at(3.0), p);
    }

    #[test]
    fn single_vertex_is_rejected() {
        let err = Polyline2D::new(vec![Point2::new(0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            EstacaError::DegenerateGeometry(GeometryError::TooFewVertices(1))
        ));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let err = Polyline2D::new(vec![Point2::new(0.0, 0.0), Point2::new(f64::NAN, 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            EstacaError::DegenerateGeometry(GeometryError::NonFiniteVertex { index: 1 })
        ));
    }
}
