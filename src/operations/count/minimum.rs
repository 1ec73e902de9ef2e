use crate::error::{ParameterError, Result};

/// Returns the regulatory (IBRAOP) minimum sample count for a road.
///
/// The smallest `count` with `count * min_area >= length * lane_width`,
/// i.e. `ceil(length * lane_width / min_area)`.
///
/// # Errors
///
/// Returns `ParameterError` if any input is not finite and strictly
/// positive, or if the count does not fit in a `u32`.
pub fn compute_minimum_count(length: f64, lane_width: f64, min_area: f64) -> Result<u32> {
    let length = ParameterError::require_positive("length", length)?;
    let lane_width = ParameterError::require_positive("lane_width", lane_width)?;
    let min_area = ParameterError::require_positive("min_area", min_area)?;

    let count = (length * lane_width / min_area).ceil();
    if count > f64::from(u32::MAX) {
        return Err(ParameterError {
            name: "min_area",
            value: min_area,
            requirement: "too small for the road area",
        }
        .into());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(count as u32)
}
