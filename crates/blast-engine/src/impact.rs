//! Per-person injury classification by distance from the epicenter

use std::fmt;

use detections::{DetectedObject, Point};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::ladder::ThresholdLadder;
use crate::scale::ScaleFactor;
use crate::BlastError;

/// Injury status, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InjuryStatus {
    Fatal,
    CriticalInjury,
    MinorInjury,
    Safe,
}

/// Lethality falloff in meters. Kept separate from the yield ladder.
pub const INJURY_LADDER: ThresholdLadder<InjuryStatus> = ThresholdLadder::new(
    &[
        (8.0, InjuryStatus::Fatal),
        (20.0, InjuryStatus::CriticalInjury),
        (35.0, InjuryStatus::MinorInjury),
    ],
    InjuryStatus::Safe,
);

impl InjuryStatus {
    /// Classify a distance from the epicenter given in meters
    pub fn from_distance(distance_m: f64) -> Self {
        INJURY_LADDER.classify(distance_m)
    }

    /// Report and overlay label
    pub fn label(&self) -> &'static str {
        match self {
            InjuryStatus::Fatal => "Fatal",
            InjuryStatus::CriticalInjury => "Critical Injury",
            InjuryStatus::MinorInjury => "Minor Injury",
            InjuryStatus::Safe => "Safe",
        }
    }

    /// Marker color for annotated images, RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            InjuryStatus::Fatal => [255, 0, 0],
            InjuryStatus::CriticalInjury => [255, 165, 0],
            InjuryStatus::MinorInjury => [255, 255, 0],
            InjuryStatus::Safe => [0, 255, 0],
        }
    }
}

impl fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InjuryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One row of the human damage report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRecord {
    /// Person box center in pixels
    pub center: Point,
    /// Distance to the epicenter in meters, rounded for reporting
    pub distance_m: f64,
    pub status: InjuryStatus,
}

/// Classify every person, preserving input order
///
/// Status uses the unrounded distance; only `distance_m` is rounded.
pub fn assess_people<'a>(
    people: impl IntoIterator<Item = &'a DetectedObject>,
    epicenter: Point,
    scale: ScaleFactor,
    decimals: u32,
) -> Result<Vec<PersonRecord>, BlastError> {
    people
        .into_iter()
        .map(|person| {
            let center = person.center();
            let distance_m = scale.to_meters(center.distance_to(&epicenter))?;
            let status = InjuryStatus::from_distance(distance_m);
            debug!(x = center.x, y = center.y, distance_m, %status, "Classified person");
            Ok(PersonRecord {
                center,
                distance_m: round_to(distance_m, decimals),
                status,
            })
        })
        .collect()
}

/// Round half away from zero to `decimals` places
///
/// Values too large to scale are already exact at that precision and
/// come back unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_ROUNDING_EXPONENT) as i32);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

const MAX_ROUNDING_EXPONENT: u32 = 308;

#[cfg(test)]
mod tests {
    use super::*;
    use detections::BoundingBox;
    use proptest::prelude::*;

    fn person(x1: f64, y1: f64, x2: f64, y2: f64) -> DetectedObject {
        DetectedObject::new("person", BoundingBox::new(x1, y1, x2, y2)).unwrap()
    }

    #[test]
    fn test_status_buckets() {
        assert_eq!(InjuryStatus::from_distance(0.0), InjuryStatus::Fatal);
        assert_eq!(InjuryStatus::from_distance(7.99), InjuryStatus::Fatal);
        assert_eq!(InjuryStatus::from_distance(8.0), InjuryStatus::CriticalInjury);
        assert_eq!(InjuryStatus::from_distance(19.99), InjuryStatus::CriticalInjury);
        assert_eq!(InjuryStatus::from_distance(20.0), InjuryStatus::MinorInjury);
        assert_eq!(InjuryStatus::from_distance(35.0), InjuryStatus::Safe);
    }

    #[test]
    fn test_injury_and_yield_ladders_differ() {
        // 18 m is a Medium IED radius but still a critical-injury distance
        assert_eq!(InjuryStatus::from_distance(18.0), InjuryStatus::CriticalInjury);
        let injury: Vec<f64> = INJURY_LADDER.bounds().collect();
        let yields: Vec<f64> = crate::explosive::YIELD_LADDER.bounds().collect();
        assert_ne!(injury, yields);
    }

    #[test]
    fn test_assess_preserves_order_and_rounds() {
        let people = vec![person(90.0, 0.0, 110.0, 20.0), person(0.0, 0.0, 10.0, 20.0)];
        let scale = ScaleFactor::new(0.0333333).unwrap();
        let records = assess_people(&people, Point::new(5.0, 10.0), scale, 2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].center, Point::new(100.0, 10.0));
        assert_eq!(records[0].distance_m, 3.17);
        assert_eq!(records[1].distance_m, 0.0);
        assert!(records.iter().all(|r| r.status == InjuryStatus::Fatal));
    }

    #[test]
    fn test_status_uses_unrounded_distance() {
        // 7.996 m rounds to 8.0 for the report but is still fatal
        let people = vec![person(0.0, 0.0, 0.0, 0.0)];
        let scale = ScaleFactor::new(0.07996).unwrap();
        let records = assess_people(&people, Point::new(100.0, 0.0), scale, 2).unwrap();
        assert_eq!(records[0].distance_m, 8.0);
        assert_eq!(records[0].status, InjuryStatus::Fatal);
    }

    #[test]
    fn test_overflowing_distance_rejected() {
        let people = vec![person(1000.0, 0.0, 1010.0, 0.0)];
        let scale = ScaleFactor::new(1.7e308).unwrap();
        let err = assess_people(&people, Point::new(0.0, 0.0), scale, 2).unwrap_err();
        assert!(matches!(err, BlastError::MeasurementOverflow { .. }));
    }

    #[test]
    fn test_round_to_never_produces_nan() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(3.14159, 400), 3.14159);
        assert_eq!(round_to(1e300, 15), 1e300);
    }

    #[test]
    fn test_serializes_as_label() {
        for status in [
            InjuryStatus::Fatal,
            InjuryStatus::CriticalInjury,
            InjuryStatus::MinorInjury,
            InjuryStatus::Safe,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.label()));
        }
    }

    #[test]
    fn test_record_json_shape() {
        let record = PersonRecord {
            center: Point::new(5.0, 10.0),
            distance_m: 4.25,
            status: InjuryStatus::CriticalInjury,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"center": [5.0, 10.0], "distance_m": 4.25, "status": "Critical Injury"})
        );
    }

    proptest! {
        #[test]
        fn prop_status_is_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(InjuryStatus::from_distance(lo) <= InjuryStatus::from_distance(hi));
        }
    }
}
