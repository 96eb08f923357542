//! Detections
//!
//! Detected-object model, pixel-space geometry, and validation of the
//! detector's output contract.

mod error;
mod geometry;
mod object;
mod validator;

pub use error::ValidationError;
pub use geometry::{center_of, distance, BoundingBox, Point};
pub use object::{DetectedObject, PERSON_LABEL};
pub use validator::{RawDetection, ValidationConfig, Validator};
