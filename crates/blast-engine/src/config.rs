//! Blast engine configuration

use detections::{ValidationConfig, PERSON_LABEL};
use serde::{Deserialize, Serialize};

use crate::scale::ScaleFactor;
use crate::BlastError;

/// Most decimal places an `f64` distance can meaningfully carry
pub const MAX_DISTANCE_DECIMALS: u32 = 15;

/// Blast engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastConfig {
    /// Detector label counted as a person
    pub person_label: String,

    /// Assumed real-world person height (meters)
    pub reference_person_height_m: f64,

    /// Scale used when no person is detected (meters per pixel)
    pub fallback_scale_m_per_px: f64,

    /// Decimal places kept in reported person distances
    pub distance_decimals: u32,

    /// Detector output checks
    pub validation: ValidationConfig,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            person_label: PERSON_LABEL.to_string(),
            reference_person_height_m: 1.7,
            fallback_scale_m_per_px: 0.02,
            distance_decimals: 2,
            validation: ValidationConfig::default(),
        }
    }
}

impl BlastConfig {
    /// Reject settings that would yield a non-positive scale or
    /// unrepresentable distances
    pub fn validate(&self) -> Result<(), BlastError> {
        ScaleFactor::new(self.fallback_scale_m_per_px)?;
        if !(self.reference_person_height_m.is_finite() && self.reference_person_height_m > 0.0) {
            return Err(BlastError::InvalidScale {
                scale: self.reference_person_height_m,
            });
        }
        if self.distance_decimals > MAX_DISTANCE_DECIMALS {
            return Err(BlastError::InvalidConfig {
                field: "distance_decimals",
                reason: format!(
                    "must be at most {MAX_DISTANCE_DECIMALS}, got {}",
                    self.distance_decimals
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BlastConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_fallback_rejected() {
        let config = BlastConfig {
            fallback_scale_m_per_px: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BlastError::InvalidScale { .. })));
    }

    #[test]
    fn test_negative_reference_height_rejected() {
        let config = BlastConfig {
            reference_person_height_m: -1.7,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_distance_decimals_rejected() {
        let config = BlastConfig {
            distance_decimals: 400,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BlastError::InvalidConfig { field: "distance_decimals", .. })
        ));

        let config = BlastConfig {
            distance_decimals: MAX_DISTANCE_DECIMALS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: BlastConfig =
            serde_json::from_str(r#"{"fallback_scale_m_per_px": 0.05}"#).unwrap();
        assert_eq!(config.fallback_scale_m_per_px, 0.05);
        assert_eq!(config.reference_person_height_m, 1.7);
        assert_eq!(config.person_label, "person");
    }
}
