//! # Face Detection
//!
//! The detector model itself is opaque: anything implementing
//! [`FaceDetector`] can be plugged in. This module owns what happens to raw
//! detections afterwards: confidence filtering, picking the best face,
//! padding the box with context and cropping a square face image.

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::{
    config::DetectionConfig,
    error::{DetectionError, Result},
};

/// Integer pixel rectangle, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }
}

/// A raw detection as reported by a detector model
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// `[x1, y1, x2, y2]` in source image pixels, possibly outside the image
    pub bbox: [f32; 4],

    /// Detector confidence (0.0-1.0)
    pub confidence: f32,

    /// Facial landmarks (eyes, nose, mouth corners)
    pub landmarks: Vec<(f32, f32)>,
}

/// A face cropped out of the uploaded photo, ready for stylization
#[derive(Debug, Clone)]
pub struct DetectedFace {
    /// Square crop, `crop_size` pixels on each side
    pub face: DynamicImage,

    /// Crop rectangle in the source photo, margin included
    pub bbox: BoundingBox,

    pub landmarks: Vec<(f32, f32)>,
}

/// Capability provider that finds faces in a photo
pub trait FaceDetector: Send + Sync {
    /// Returns the name of this detector
    fn name(&self) -> &str;

    /// Find all candidate faces. An empty result means no face was found.
    fn detect(&self, photo: &DynamicImage) -> Result<Vec<Detection>>;
}

/// Turn a raw detector box into the crop rectangle.
///
/// The box is truncated to whole pixels and clamped to the image, then grown
/// by `margin` times its width/height on every side and clamped again.
pub fn crop_with_margin(raw: [f32; 4], image_size: (u32, u32), margin: f32) -> BoundingBox {
    let (width, height) = (image_size.0 as i64, image_size.1 as i64);

    let x1 = (raw[0] as i64).max(0);
    let y1 = (raw[1] as i64).max(0);
    let x2 = (raw[2] as i64).min(width);
    let y2 = (raw[3] as i64).min(height);

    let box_width = (x2 - x1) as f32;
    let box_height = (y2 - y1) as f32;

    BoundingBox {
        x1: ((x1 as f32 - box_width * margin) as i64).max(0) as u32,
        y1: ((y1 as f32 - box_height * margin) as i64).max(0) as u32,
        x2: ((x2 as f32 + box_width * margin) as i64).min(width) as u32,
        y2: ((y2 as f32 + box_height * margin) as i64).min(height) as u32,
    }
}

/// Detect the most confident face in `photo` and crop it to a square.
///
/// Fails with [`DetectionError::NoFaceDetected`] when nothing clears the
/// confidence threshold.
pub fn detect_and_align(
    detector: &dyn FaceDetector,
    photo: &DynamicImage,
    config: &DetectionConfig,
) -> Result<DetectedFace> {
    let detections = detector.detect(photo)?;
    debug!("{} returned {} candidate faces", detector.name(), detections.len());

    let best = detections
        .into_iter()
        .filter(|d| d.confidence >= config.min_confidence)
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .ok_or(DetectionError::NoFaceDetected)?;

    let bbox = crop_with_margin(best.bbox, photo.dimensions(), config.margin);
    if bbox.width() == 0 || bbox.height() == 0 {
        return Err(DetectionError::NoFaceDetected.into());
    }

    info!(
        "Face detected at {:?} (confidence {:.2})",
        bbox, best.confidence
    );

    let face = photo
        .crop_imm(bbox.x1, bbox.y1, bbox.width(), bbox.height())
        .resize_exact(config.crop_size, config.crop_size, FilterType::Lanczos3);

    Ok(DetectedFace {
        face,
        bbox,
        landmarks: best.landmarks,
    })
}
