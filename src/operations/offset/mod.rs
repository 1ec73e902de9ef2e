mod lateral;
mod role;

pub use lateral::{LateralOffset, OffsetStation, TANGENT_PROBE};
pub use role::LateralRole;
