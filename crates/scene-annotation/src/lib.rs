//! Scene Annotation
//!
//! Renders a finished [`BlastReport`] onto the after-image:
//! - Filled epicenter marker
//! - Blast-radius ring
//! - One marker per person, colored by injury status
//! - The status label next to each person marker

use std::io::Cursor;
use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use blast_engine::BlastReport;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_text_mut};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Annotation error types
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Label font could not be loaded")]
    Font,
}

const FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Label offset from the person center, up and to the left
const LABEL_OFFSET: (i32, i32) = (-20, -15);

/// Annotation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Epicenter dot radius (pixels)
    pub epicenter_radius: i32,

    /// Person dot radius (pixels)
    pub person_marker_radius: i32,

    /// Blast ring line width (pixels)
    pub ring_thickness: u32,

    /// Epicenter and ring color, RGB
    pub epicenter_color: [u8; 3],

    /// Status label glyph height (pixels)
    pub label_scale: f32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            epicenter_radius: 10,
            person_marker_radius: 10,
            ring_thickness: 2,
            epicenter_color: [255, 0, 0],
            label_scale: 16.0,
        }
    }
}

/// A single overlay primitive in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    Dot {
        center: (i32, i32),
        radius: i32,
        color: [u8; 3],
    },
    Ring {
        center: (i32, i32),
        radius: i32,
        thickness: u32,
        color: [u8; 3],
    },
    Label {
        origin: (i32, i32),
        text: &'static str,
        scale: f32,
        color: [u8; 3],
    },
}

/// Overlay primitives for a report, drawn in order
pub fn overlay(report: &BlastReport, config: &AnnotationConfig) -> Vec<Mark> {
    let center = report.blast_center();
    let center = (center.x as i32, center.y as i32);

    let mut marks = Vec::with_capacity(2 * report.people().len() + 2);
    marks.push(Mark::Dot {
        center,
        radius: config.epicenter_radius,
        color: config.epicenter_color,
    });
    marks.push(Mark::Ring {
        center,
        radius: report.blast_radius_px() as i32,
        thickness: config.ring_thickness,
        color: config.epicenter_color,
    });

    for person in report.people() {
        let center = (person.center.x as i32, person.center.y as i32);
        marks.push(Mark::Dot {
            center,
            radius: config.person_marker_radius,
            color: person.status.color(),
        });
        marks.push(Mark::Label {
            origin: (center.0 + LABEL_OFFSET.0, center.1 + LABEL_OFFSET.1),
            text: person.status.label(),
            scale: config.label_scale,
            color: person.status.color(),
        });
    }

    marks
}

fn font() -> Result<FontRef<'static>, AnnotationError> {
    FontRef::try_from_slice(FONT_DATA).map_err(|_| AnnotationError::Font)
}

/// Draw marks onto an image in place
pub fn draw(image: &mut RgbImage, marks: &[Mark]) -> Result<(), AnnotationError> {
    let font = font()?;
    for mark in marks {
        match *mark {
            Mark::Dot {
                center,
                radius,
                color,
            } => draw_filled_circle_mut(image, center, radius, Rgb(color)),
            Mark::Ring {
                center,
                radius,
                thickness,
                color,
            } => {
                for offset in 0..thickness as i32 {
                    let r = radius - offset;
                    if r >= 0 {
                        draw_hollow_circle_mut(image, center, r, Rgb(color));
                    }
                }
            }
            Mark::Label {
                origin,
                text,
                scale,
                color,
            } => draw_text_mut(
                image,
                Rgb(color),
                origin.0,
                origin.1,
                PxScale::from(scale),
                &font,
                text,
            ),
        }
    }
    Ok(())
}

/// Load the after-image and draw the report overlay onto it
pub fn render(
    input: &Path,
    report: &BlastReport,
    config: &AnnotationConfig,
) -> Result<RgbImage, AnnotationError> {
    let mut image = image::open(input)?.to_rgb8();
    let marks = overlay(report, config);
    debug!(
        marks = marks.len(),
        width = image.width(),
        height = image.height(),
        "Drawing overlay"
    );

    draw(&mut image, &marks)?;
    Ok(image)
}

/// Encode an annotated image in memory, format taken from the destination extension
pub fn encode(image: &RgbImage, dest: &Path) -> Result<Vec<u8>, AnnotationError> {
    let format = ImageFormat::from_path(dest)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format)?;
    debug!(bytes = bytes.len(), ?format, "Encoded annotated image");
    Ok(bytes)
}
