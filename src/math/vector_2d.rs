use super::{Point2, Vector2};

/// Returns the cosine of the turning angle at `b` along the path `a → b → c`.
///
/// `1.0` means the path continues straight; smaller values mean a sharper
/// change of heading. Returns `None` when either leg has zero length, since
/// no heading can be derived from it.
#[must_use]
pub fn turn_cosine(a: &Point2, b: &Point2, c: &Point2) -> Option<f64> {
    let v1 = b - a;
    let v2 = c - b;
    let norm_product = v1.norm() * v2.norm();
    if norm_product <= 0.0 {
        return None;
    }
    Some(v1.dot(&v2) / norm_product)
}

/// Returns the unit left-hand normal `(-dy, dx) / |d|` of a direction vector.
///
/// Returns `None` for a zero vector.
#[must_use]
pub fn left_normal(direction: &Vector2) -> Option<Vector2> {
    let len = direction.norm();
    if len <= 0.0 || !len.is_finite() {
        return None;
    }
    Some(Vector2::new(-direction.y, direction.x) / len)
}
