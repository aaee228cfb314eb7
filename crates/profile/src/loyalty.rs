//! Loyalty tiers, derived from the point balance.

use serde::{Deserialize, Serialize};

use crate::shopper::Shopper;

/// Points needed for the top tier.
pub const PLATINUM_THRESHOLD: u32 = 3000;

/// Membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Gold,
    Platinum,
}

impl Tier {
    pub fn for_points(points: u32) -> Self {
        if points >= PLATINUM_THRESHOLD {
            Tier::Platinum
        } else {
            Tier::Gold
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Tier::Gold => f.write_str("Gold"),
            Tier::Platinum => f.write_str("Platinum"),
        }
    }
}

impl Shopper {
    pub fn tier(&self) -> Tier {
        Tier::for_points(self.loyalty_points())
    }

    pub fn points_to_platinum(&self) -> u32 {
        PLATINUM_THRESHOLD.saturating_sub(self.loyalty_points())
    }

    /// Fraction of the way to Platinum, clamped to [0, 1].
    pub fn platinum_progress(&self) -> f64 {
        (f64::from(self.loyalty_points()) / f64::from(PLATINUM_THRESHOLD)).min(1.0)
    }
}
