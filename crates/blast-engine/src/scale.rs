//! Meters-per-pixel estimation from detected person heights

use detections::BoundingBox;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::BlastConfig;
use crate::BlastError;

/// Meters per pixel, always finite and positive
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(meters_per_pixel: f64) -> Result<Self, BlastError> {
        if meters_per_pixel.is_finite() && meters_per_pixel > 0.0 {
            Ok(Self(meters_per_pixel))
        } else {
            Err(BlastError::InvalidScale {
                scale: meters_per_pixel,
            })
        }
    }

    pub fn meters_per_pixel(&self) -> f64 {
        self.0
    }

    /// Convert a pixel length, rejecting products that overflow
    pub fn to_meters(&self, pixels: f64) -> Result<f64, BlastError> {
        let meters = pixels * self.0;
        if meters.is_finite() {
            Ok(meters)
        } else {
            Err(BlastError::MeasurementOverflow {
                pixels,
                scale: self.0,
            })
        }
    }
}

/// Where the scale came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleSource {
    /// Averaged over this many person boxes
    PersonHeights(usize),
    /// No person visible, configured constant used
    Fallback,
}

/// Estimate the scale from person boxes
///
/// Averages `|y2 - y1|` and assumes every person stands
/// `reference_person_height_m` tall. With no person boxes the configured
/// fallback is returned; its accuracy degrades accordingly.
pub fn estimate_scale(
    person_boxes: &[BoundingBox],
    config: &BlastConfig,
) -> Result<(ScaleFactor, ScaleSource), BlastError> {
    if person_boxes.is_empty() {
        warn!(
            fallback = config.fallback_scale_m_per_px,
            "No person detected, using fallback scale"
        );
        let scale = ScaleFactor::new(config.fallback_scale_m_per_px)?;
        return Ok((scale, ScaleSource::Fallback));
    }

    let total: f64 = person_boxes.iter().map(BoundingBox::height).sum();
    let avg_height_px = total / person_boxes.len() as f64;
    let scale = ScaleFactor::new(config.reference_person_height_m / avg_height_px)?;

    debug!(
        persons = person_boxes.len(),
        avg_height_px,
        meters_per_pixel = scale.meters_per_pixel(),
        "Estimated scale"
    );
    Ok((scale, ScaleSource::PersonHeights(person_boxes.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fallback_without_persons() {
        let (scale, source) = estimate_scale(&[], &BlastConfig::default()).unwrap();
        assert_eq!(scale.meters_per_pixel(), 0.02);
        assert_eq!(source, ScaleSource::Fallback);
    }

    #[test]
    fn test_scale_from_single_person() {
        let boxes = [BoundingBox::new(0.0, 0.0, 10.0, 20.0)];
        let (scale, source) = estimate_scale(&boxes, &BlastConfig::default()).unwrap();
        assert!((scale.meters_per_pixel() - 0.085).abs() < 1e-12);
        assert_eq!(source, ScaleSource::PersonHeights(1));
    }

    #[test]
    fn test_scale_averages_heights() {
        let boxes = [
            BoundingBox::new(0.0, 0.0, 10.0, 100.0),
            BoundingBox::new(0.0, 300.0, 10.0, 0.0),
        ];
        let (scale, _) = estimate_scale(&boxes, &BlastConfig::default()).unwrap();
        assert!((scale.meters_per_pixel() - 1.7 / 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_height_persons_rejected() {
        let boxes = [BoundingBox::new(0.0, 5.0, 10.0, 5.0)];
        let err = estimate_scale(&boxes, &BlastConfig::default()).unwrap_err();
        assert!(matches!(err, BlastError::InvalidScale { .. }));
    }

    #[test]
    fn test_scale_factor_rejects_non_positive() {
        assert!(ScaleFactor::new(0.0).is_err());
        assert!(ScaleFactor::new(-0.02).is_err());
        assert!(ScaleFactor::new(f64::NAN).is_err());
        assert!(ScaleFactor::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_to_meters_rejects_overflow() {
        let scale = ScaleFactor::new(1.7e308).unwrap();
        assert_eq!(scale.to_meters(0.0).unwrap(), 0.0);
        assert!(matches!(
            scale.to_meters(1000.0),
            Err(BlastError::MeasurementOverflow { pixels, .. }) if pixels == 1000.0
        ));
    }

    proptest! {
        #[test]
        fn prop_scale_positive(heights in proptest::collection::vec(0.5f64..2000.0, 0..20)) {
            let boxes: Vec<BoundingBox> = heights
                .iter()
                .map(|h| BoundingBox::new(0.0, 0.0, 10.0, *h))
                .collect();
            let (scale, _) = estimate_scale(&boxes, &BlastConfig::default()).unwrap();
            prop_assert!(scale.meters_per_pixel() > 0.0);
            if boxes.is_empty() {
                prop_assert_eq!(scale.meters_per_pixel(), 0.02);
            }
        }
    }
}
