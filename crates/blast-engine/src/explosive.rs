//! Explosive yield classification from blast radius

use std::fmt;

use serde::{Serialize, Serializer};

use crate::ladder::ThresholdLadder;

/// Coarse explosive class, ordered by yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExplosiveType {
    HandGrenade,
    SmallIed,
    MediumIed,
    CarBomb,
    HeavyExplosive,
}

/// Radius ladder in meters
pub const YIELD_LADDER: ThresholdLadder<ExplosiveType> = ThresholdLadder::new(
    &[
        (8.0, ExplosiveType::HandGrenade),
        (18.0, ExplosiveType::SmallIed),
        (35.0, ExplosiveType::MediumIed),
        (80.0, ExplosiveType::CarBomb),
    ],
    ExplosiveType::HeavyExplosive,
);

impl ExplosiveType {
    /// Classify a blast radius given in meters
    pub fn from_radius(radius_m: f64) -> Self {
        YIELD_LADDER.classify(radius_m)
    }

    /// Report label
    pub fn label(&self) -> &'static str {
        match self {
            ExplosiveType::HandGrenade => "Hand Grenade (100-200g TNT)",
            ExplosiveType::SmallIed => "Small IED (0.5-1kg TNT)",
            ExplosiveType::MediumIed => "Medium IED or Backpack Bomb (2-5kg TNT)",
            ExplosiveType::CarBomb => "VBIED or Car Bomb (10-50kg TNT)",
            ExplosiveType::HeavyExplosive => "Air-dropped Bomb or Heavy Explosive (100kg+ TNT)",
        }
    }
}

impl fmt::Display for ExplosiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ExplosiveType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_radius_buckets() {
        assert_eq!(ExplosiveType::from_radius(0.0), ExplosiveType::HandGrenade);
        assert_eq!(ExplosiveType::from_radius(4.25), ExplosiveType::HandGrenade);
        assert_eq!(ExplosiveType::from_radius(12.0), ExplosiveType::SmallIed);
        assert_eq!(ExplosiveType::from_radius(25.0), ExplosiveType::MediumIed);
        assert_eq!(ExplosiveType::from_radius(50.0), ExplosiveType::CarBomb);
        assert_eq!(ExplosiveType::from_radius(500.0), ExplosiveType::HeavyExplosive);
    }

    #[test]
    fn test_boundaries_belong_to_upper_bucket() {
        assert_eq!(ExplosiveType::from_radius(7.999), ExplosiveType::HandGrenade);
        assert_eq!(ExplosiveType::from_radius(8.0), ExplosiveType::SmallIed);
        assert_eq!(ExplosiveType::from_radius(18.0), ExplosiveType::MediumIed);
        assert_eq!(ExplosiveType::from_radius(35.0), ExplosiveType::CarBomb);
        assert_eq!(ExplosiveType::from_radius(80.0), ExplosiveType::HeavyExplosive);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ExplosiveType::CarBomb).unwrap();
        assert_eq!(json, "\"VBIED or Car Bomb (10-50kg TNT)\"");
        assert_eq!(ExplosiveType::CarBomb.to_string(), "VBIED or Car Bomb (10-50kg TNT)");
    }

    proptest! {
        #[test]
        fn prop_yield_is_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ExplosiveType::from_radius(lo) <= ExplosiveType::from_radius(hi));
        }
    }
}
