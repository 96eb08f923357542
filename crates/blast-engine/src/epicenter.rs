//! Blast center and radius from detection centers

use detections::Point;
use tracing::debug;

use crate::scale::ScaleFactor;
use crate::BlastError;

/// Epicenter and pixel radius of one after-image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastGeometry {
    /// Unweighted centroid of all detection centers
    pub center: Point,
    /// Largest center-to-epicenter distance, in pixels
    pub radius_px: f64,
}

impl BlastGeometry {
    pub fn radius_m(&self, scale: ScaleFactor) -> Result<f64, BlastError> {
        scale.to_meters(self.radius_px)
    }
}

/// Locate the epicenter and blast radius
///
/// The radius is set by whichever single detection, of any class, lies
/// farthest from the centroid. One far-off bystander object widens the
/// radius; this is the worst-case reading.
pub fn locate_epicenter(centers: &[Point]) -> Result<BlastGeometry, BlastError> {
    if centers.is_empty() {
        return Err(BlastError::EmptyInput);
    }

    let n = centers.len() as f64;
    let center = Point::new(
        centers.iter().map(|p| p.x).sum::<f64>() / n,
        centers.iter().map(|p| p.y).sum::<f64>() / n,
    );

    let radius_px = centers
        .iter()
        .map(|p| p.distance_to(&center))
        .fold(0.0, f64::max);

    debug!(
        x = center.x,
        y = center.y,
        radius_px,
        detections = centers.len(),
        "Located epicenter"
    );
    Ok(BlastGeometry { center, radius_px })
}
