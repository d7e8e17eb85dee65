//! Which citizen segments feel a sector-wide event.

use serde::{Deserialize, Serialize};
use society_core::{CitizenSegment, Sector};

/// Decides whether a sector-targeted event reaches a segment's satisfaction.
pub trait SectorAffinity: Send + Sync {
    fn is_exposed(&self, segment: &CitizenSegment, sector: Sector) -> bool;
}

/// Essentials reach everyone; discretionary sectors only reach segments
/// wealthy enough to buy from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WealthAffinity {
    /// Minimum `wealth_per_capita` for exposure to discretionary sectors.
    pub discretionary_wealth_threshold: f64,
}

impl Default for WealthAffinity {
    fn default() -> Self {
        Self {
            discretionary_wealth_threshold: 40_000.0,
        }
    }
}

/// Housing, food and healthcare.
pub fn is_essential(sector: Sector) -> bool {
    matches!(sector, Sector::Housing | Sector::Food | Sector::Healthcare)
}

impl SectorAffinity for WealthAffinity {
    fn is_exposed(&self, segment: &CitizenSegment, sector: Sector) -> bool {
        is_essential(sector) || segment.wealth_per_capita() >= self.discretionary_wealth_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use society_core::{CitizenSegmentSpec, IdeologicalBias};

    fn segment(wealth: f64) -> CitizenSegment {
        CitizenSegment::new(CitizenSegmentSpec::new("s", "S", 10, wealth, IdeologicalBias::Left))
            .unwrap()
    }

    #[test]
    fn essentials_reach_everyone() {
        let rule = WealthAffinity::default();
        let poor = segment(1_000.0);
        for sector in [Sector::Housing, Sector::Food, Sector::Healthcare] {
            assert!(rule.is_exposed(&poor, sector));
        }
        assert!(!rule.is_exposed(&poor, Sector::Finance));
        assert!(!rule.is_exposed(&poor, Sector::Technology));
        assert!(!rule.is_exposed(&poor, Sector::Construction));
    }

    #[test]
    fn wealthy_segments_feel_discretionary_sectors() {
        let rule = WealthAffinity::default();
        let rich = segment(40_000.0);
        assert!(Sector::ALL.iter().all(|s| rule.is_exposed(&rich, *s)));
    }
}
