//! Blast Impact Analysis Engine
//!
//! Turns the object detections of a damage-site photograph into a blast
//! impact assessment:
//! - Meters-per-pixel scale from detected person heights
//! - Epicenter and blast radius from detection centers
//! - Explosive yield class from the blast radius
//! - Per-person injury status from distance to the epicenter
//! - Before/after casualty delta
//! - Emergency service recommendation

pub mod casualty;
pub mod config;
pub mod epicenter;
pub mod explosive;
pub mod impact;
pub mod ladder;
pub mod report;
pub mod scale;
pub mod services;

pub use casualty::CasualtySummary;
pub use config::BlastConfig;
pub use epicenter::{locate_epicenter, BlastGeometry};
pub use explosive::ExplosiveType;
pub use impact::{assess_people, InjuryStatus, PersonRecord};
pub use report::{BlastReport, ObjectSummary};
pub use scale::{estimate_scale, ScaleFactor, ScaleSource};
pub use services::{recommend_services, EmergencyService, ServiceRecommendation};

use std::fmt;

use detections::{DetectedObject, RawDetection, ValidationError, Validator};
use thiserror::Error;
use tracing::info;

/// Blast engine error types
#[derive(Error, Debug)]
pub enum BlastError {
    #[error("No detections in the after-image, blast center is undefined")]
    EmptyInput,

    #[error("Invalid scale: {scale} m/px must be finite and positive")]
    InvalidScale { scale: f64 },

    #[error("{pixels} px at {scale} m/px is not a finite distance")]
    MeasurementOverflow { pixels: f64, scale: f64 },

    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Malformed detection #{index} in {set} image: {source}")]
    MalformedDetection {
        set: DetectionSet,
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Report serialization failed: {0}")]
    Serialization(String),
}

/// Which photograph a detection set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSet {
    Before,
    After,
}

impl fmt::Display for DetectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSet::Before => f.write_str("before"),
            DetectionSet::After => f.write_str("after"),
        }
    }
}

/// Blast impact analyzer
pub struct BlastAnalyzer {
    config: BlastConfig,
    validator: Validator,
}

impl BlastAnalyzer {
    /// Create a new analyzer, rejecting invalid configurations
    pub fn new(config: BlastConfig) -> Result<Self, BlastError> {
        config.validate()?;
        Ok(Self {
            validator: Validator::new(config.validation.clone()),
            config,
        })
    }

    pub fn config(&self) -> &BlastConfig {
        &self.config
    }

    /// Validate raw detector output for one image
    pub fn ingest(
        &self,
        set: DetectionSet,
        raws: &[RawDetection],
    ) -> Result<Vec<DetectedObject>, BlastError> {
        raws.iter()
            .enumerate()
            .map(|(index, raw)| {
                self.validator
                    .validate(raw)
                    .map_err(|source| BlastError::MalformedDetection { set, index, source })
            })
            .collect()
    }

    /// Validate both detection sets, then analyze them
    pub fn analyze_raw(
        &self,
        after: &[RawDetection],
        before: &[RawDetection],
    ) -> Result<BlastReport, BlastError> {
        let after = self.ingest(DetectionSet::After, after)?;
        let before = self.ingest(DetectionSet::Before, before)?;
        self.analyze(&after, &before)
    }

    /// Produce the blast report for an after-image, using the before-image
    /// only for the person count
    pub fn analyze(
        &self,
        after: &[DetectedObject],
        before: &[DetectedObject],
    ) -> Result<BlastReport, BlastError> {
        let person_label = self.config.person_label.as_str();

        let centers: Vec<_> = after.iter().map(DetectedObject::center).collect();
        let geometry = locate_epicenter(&centers)?;

        let person_boxes: Vec<_> = after
            .iter()
            .filter(|obj| obj.is(person_label))
            .map(|obj| *obj.bbox())
            .collect();
        let (scale, scale_source) = estimate_scale(&person_boxes, &self.config)?;

        let radius_m = geometry.radius_m(scale)?;
        let explosive_type = ExplosiveType::from_radius(radius_m);

        let people = assess_people(
            after.iter().filter(|obj| obj.is(person_label)),
            geometry.center,
            scale,
            self.config.distance_decimals,
        )?;

        let people_before = before.iter().filter(|obj| obj.is(person_label)).count();
        let summary = CasualtySummary::compare(people_before, people.len());

        let objects = after.iter().map(ObjectSummary::from).collect();
        let services = recommend_services(&people, after.iter().map(DetectedObject::label));

        info!(
            detections = after.len(),
            radius_m,
            explosive = %explosive_type,
            people_lost = summary.people_lost,
            services = services.len(),
            "Blast analysis complete"
        );

        Ok(BlastReport::assemble(
            geometry,
            radius_m,
            scale,
            scale_source,
            explosive_type,
            people,
            objects,
            summary,
            services,
        ))
    }
}
