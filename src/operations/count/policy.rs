use serde::{Deserialize, Serialize};

/// How a requested sample count is reconciled with the regulatory minimum.
///
/// The choice is a product decision left to the caller; every run reports
/// both counts regardless of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Sample exactly the requested count, even below the minimum.
    #[default]
    Requested,
    /// Sample exactly the regulatory minimum.
    RegulatoryMinimum,
    /// Sample `max(requested, minimum)`.
    AtLeastMinimum,
}

impl CountPolicy {
    /// Returns the count to sample.
    #[must_use]
    pub fn resolve(self, requested: u32, minimum: u32) -> u32 {
        match self {
            Self::Requested => requested,
            Self::RegulatoryMinimum => minimum,
            Self::AtLeastMinimum => requested.max(minimum),
        }
    }
}
