//! Blast report, the aggregate handed to renderers

use detections::{DetectedObject, Point};
use serde::Serialize;

use crate::casualty::CasualtySummary;
use crate::epicenter::BlastGeometry;
use crate::explosive::ExplosiveType;
use crate::impact::PersonRecord;
use crate::scale::{ScaleFactor, ScaleSource};
use crate::services::ServiceRecommendation;
use crate::BlastError;

/// Detected object as listed in the report: label and box center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSummary {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl From<&DetectedObject> for ObjectSummary {
    fn from(obj: &DetectedObject) -> Self {
        let center = obj.center();
        Self {
            label: obj.label().to_string(),
            x: center.x,
            y: center.y,
        }
    }
}

/// Complete blast impact assessment for one after-image
///
/// Built once by [`BlastAnalyzer`](crate::BlastAnalyzer) and read-only
/// afterwards. Serializes to the report file layout; the pixel radius and
/// scale stay in memory for renderers.
#[derive(Debug, Clone, Serialize)]
pub struct BlastReport {
    blast_center: Point,

    /// Meters, unrounded
    blast_radius: f64,

    estimate_explosive_type: ExplosiveType,

    human_damage_report: Vec<PersonRecord>,

    objects_detected: Vec<ObjectSummary>,

    summary: CasualtySummary,

    recommended_services: ServiceRecommendation,

    #[serde(skip)]
    radius_px: f64,

    #[serde(skip)]
    scale: ScaleFactor,

    #[serde(skip)]
    scale_source: ScaleSource,
}

impl BlastReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        geometry: BlastGeometry,
        radius_m: f64,
        scale: ScaleFactor,
        scale_source: ScaleSource,
        explosive_type: ExplosiveType,
        people: Vec<PersonRecord>,
        objects: Vec<ObjectSummary>,
        summary: CasualtySummary,
        services: ServiceRecommendation,
    ) -> Self {
        Self {
            blast_center: geometry.center,
            blast_radius: radius_m,
            estimate_explosive_type: explosive_type,
            human_damage_report: people,
            objects_detected: objects,
            summary,
            recommended_services: services,
            radius_px: geometry.radius_px,
            scale,
            scale_source,
        }
    }

    /// Epicenter in pixels
    pub fn blast_center(&self) -> Point {
        self.blast_center
    }

    /// Blast radius in meters
    pub fn blast_radius_m(&self) -> f64 {
        self.blast_radius
    }

    /// Blast radius in pixels
    pub fn blast_radius_px(&self) -> f64 {
        self.radius_px
    }

    pub fn explosive_type(&self) -> ExplosiveType {
        self.estimate_explosive_type
    }

    /// Per-person records in detection order
    pub fn people(&self) -> &[PersonRecord] {
        &self.human_damage_report
    }

    pub fn objects(&self) -> &[ObjectSummary] {
        &self.objects_detected
    }

    pub fn summary(&self) -> &CasualtySummary {
        &self.summary
    }

    pub fn services(&self) -> &ServiceRecommendation {
        &self.recommended_services
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    pub fn scale_source(&self) -> ScaleSource {
        self.scale_source
    }

    /// Pretty-printed JSON, two-space indent
    pub fn to_json_pretty(&self) -> Result<String, BlastError> {
        serde_json::to_string_pretty(self).map_err(|e| BlastError::Serialization(e.to_string()))
    }
}
