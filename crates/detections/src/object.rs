//! Detected objects as produced by the upstream detector

use serde::Serialize;

use crate::error::ValidationError;
use crate::geometry::{BoundingBox, Point};

/// Label the detector assigns to people
pub const PERSON_LABEL: &str = "person";

/// One detection: a class label and its bounding box
///
/// Only constructible through [`DetectedObject::new`] or the
/// [`Validator`](crate::Validator), so every instance has a non-empty
/// label and finite coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedObject {
    label: String,
    #[serde(rename = "box")]
    bbox: BoundingBox,
    center: Point,
}

impl DetectedObject {
    /// Create a detection, rejecting empty labels and non-finite coordinates
    pub fn new(label: impl Into<String>, bbox: BoundingBox) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::MissingField("label"));
        }

        for (field, value) in bbox.coordinates() {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
        }

        Ok(Self {
            center: bbox.center(),
            label,
            bbox,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Box center, derived at construction
    pub fn center(&self) -> Point {
        self.center
    }

    /// Whether the detector labeled this object `label`
    pub fn is(&self, label: &str) -> bool {
        self.label == label
    }
}
