use std::fmt;

use serde::{Deserialize, Serialize};

/// Cross-section position of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralRole {
    RightEdge,
    Axis,
    LeftEdge,
}

impl LateralRole {
    /// Fixed role sequence, repeated along the road.
    pub const CYCLE: [Self; 3] = [Self::RightEdge, Self::Axis, Self::LeftEdge];

    /// Role of the sample at 0-based `position` in station order.
    #[must_use]
    pub fn for_position(position: usize) -> Self {
        Self::CYCLE[position % Self::CYCLE.len()]
    }

    /// Signed distance from the centerline along its left-hand normal.
    #[must_use]
    pub fn offset(self, half_width: f64) -> f64 {
        match self {
            Self::RightEdge => half_width,
            Self::Axis => 0.0,
            Self::LeftEdge => -half_width,
        }
    }

    /// Field label used on audit sheets.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RightEdge => "Bordo Direito",
            Self::Axis => "Eixo",
            Self::LeftEdge => "Bordo Esquerdo",
        }
    }
}

impl fmt::Display for LateralRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
