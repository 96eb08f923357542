//! Detector Output Validation

use crate::error::ValidationError;
use crate::geometry::BoundingBox;
use crate::object::DetectedObject;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Detection as it arrives from the detector, before any checks
///
/// Wire form: `{"label": "person", "box": [x1, y1, x2, y2]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "box")]
    pub bbox: Option<Vec<f64>>,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, bbox: [f64; 4]) -> Self {
        Self {
            label: Some(label.into()),
            bbox: Some(bbox.to_vec()),
        }
    }
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accepted pixel coordinate range, inclusive
    pub coordinate_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            coordinate_range: (-1.0e6, 1.0e6),
        }
    }
}

/// Validator turning raw detector records into [`DetectedObject`]s
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single coordinate
    pub fn validate_coordinate(&self, field: &'static str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, value });
        }

        let (min, max) = self.config.coordinate_range;
        if value < min || value > max {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a raw detection and build the immutable object
    pub fn validate(&self, raw: &RawDetection) -> Result<DetectedObject, ValidationError> {
        let label = raw
            .label
            .as_deref()
            .ok_or(ValidationError::MissingField("label"))?;

        let coords = raw
            .bbox
            .as_deref()
            .ok_or(ValidationError::MissingField("box"))?;

        let bbox: [f64; 4] = coords.try_into().map_err(|_| {
            ValidationError::InvalidFormat(format!(
                "box must have 4 coordinates [x1, y1, x2, y2], got {}",
                coords.len()
            ))
        })?;
        let bbox = BoundingBox::from(bbox);

        for (field, value) in bbox.coordinates() {
            self.validate_coordinate(field, value)?;
        }

        let object = DetectedObject::new(label, bbox)?;
        debug!(label = object.label(), "Accepted detection");
        Ok(object)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
