pub mod count;
pub mod curvature;
pub mod offset;
pub mod sampling;

pub use count::{compute_minimum_count, CountPolicy};
pub use curvature::{CurveZones, ForbiddenZone, ZoneSet};
pub use offset::{LateralOffset, LateralRole, OffsetStation};
pub use sampling::{CancellationCheck, DistanceSampler, SampledStations, StopReason};
