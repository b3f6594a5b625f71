use std::path::{Path, PathBuf};

use image::{imageops, imageops::FilterType, DynamicImage, GenericImageView, RgbImage, RgbaImage};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    compositing::{
        aspect_fit, estimate_face_region, fallback, feathered_mask,
        mask::DEFAULT_FEATHER_SIZE,
    },
    config::CompositingConfig,
    detection::BoundingBox,
    error::{CompositingError, Result},
};

/// Default flat brightness applied after blending (slight darkening).
pub const DEFAULT_BRIGHTNESS_FACTOR: f32 = 0.98;

/// Places a stylized face into template artwork.
///
/// Holds only the default template path and the blend tunables, so one
/// instance can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct TemplateCompositor {
    template_path: PathBuf,
    feather_size: u32,
    brightness_factor: f32,
}

impl TemplateCompositor {
    /// Create a compositor with default feathering and brightness
    pub fn new<P: Into<PathBuf>>(template_path: P) -> Self {
        Self {
            template_path: template_path.into(),
            feather_size: DEFAULT_FEATHER_SIZE,
            brightness_factor: DEFAULT_BRIGHTNESS_FACTOR,
        }
    }

    pub fn from_config(config: &CompositingConfig) -> Self {
        Self {
            template_path: config.template_path(),
            feather_size: config.feather_size,
            brightness_factor: config.brightness_factor,
        }
    }

    pub fn with_feather_size(mut self, feather_size: u32) -> Self {
        self.feather_size = feather_size;
        self
    }

    pub fn with_brightness_factor(mut self, brightness_factor: f32) -> Self {
        self.brightness_factor = brightness_factor;
        self
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Composite `face` into a template.
    ///
    /// Uses `template_path` when given, else the instance default. A missing
    /// template file is not an error: a plain decorative canvas is
    /// synthesized instead. `original_bbox` is accepted for interface
    /// compatibility and does not influence placement.
    pub fn composite(
        &self,
        face: &DynamicImage,
        original_bbox: Option<BoundingBox>,
        template_path: Option<&Path>,
    ) -> Result<RgbImage> {
        let template_path = template_path.unwrap_or(&self.template_path);

        if let Some(bbox) = original_bbox {
            debug!("Ignoring original face box {:?} for placement", bbox);
        }

        if !template_path.exists() {
            info!("Template {:?} not found, synthesizing a fallback canvas", template_path);
            return Ok(fallback::synthesize_template(face, self.feather_size));
        }

        let template = load_template(template_path)?;
        self.composite_onto(&template, face)
    }

    /// Composite `face` into an already loaded template. The template is
    /// copied, never modified.
    pub fn composite_onto(&self, template: &RgbImage, face: &DynamicImage) -> Result<RgbImage> {
        let (template_width, template_height) = template.dimensions();
        let region = estimate_face_region(template_width, template_height);

        if region.width() == 0 || region.height() == 0 {
            return Err(CompositingError::DegenerateGeometry {
                details: format!(
                    "face region {:?} in {}x{} template is empty",
                    region, template_width, template_height
                ),
            }
            .into());
        }

        let (fit_width, fit_height) =
            aspect_fit(face.dimensions(), (region.width(), region.height()));

        if fit_width == 0 || fit_height == 0 {
            return Err(CompositingError::DegenerateGeometry {
                details: format!(
                    "{}x{} face cannot be fitted into {}x{} region",
                    face.width(),
                    face.height(),
                    region.width(),
                    region.height()
                ),
            }
            .into());
        }

        let overlay = masked_face(face, fit_width, fit_height, self.feather_size);

        let paste_x = region.x1 + (region.width() - fit_width) / 2;
        let paste_y = region.y1 + (region.height() - fit_height) / 2;

        debug!(
            "Placing {}x{} face at ({}, {}) in region {:?}",
            fit_width, fit_height, paste_x, paste_y, region
        );

        let mut result = template.clone();
        alpha_blend(&mut result, &overlay, paste_x, paste_y);
        adjust_brightness(&mut result, self.brightness_factor);

        Ok(result)
    }
}

fn load_template(path: &Path) -> Result<RgbImage> {
    let template = image::open(path).map_err(|e| CompositingError::TemplateLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    debug!("Loaded template {:?} ({}x{})", path, template.width(), template.height());
    Ok(template.to_rgb8())
}

/// Resize `face` to exactly `width` x `height` with Lanczos3 and replace its
/// alpha channel with a feathered mask. Any alpha the face carried is lost.
pub(crate) fn masked_face(face: &DynamicImage, width: u32, height: u32, feather: u32) -> RgbaImage {
    let mut resized = imageops::resize(face, width, height, FilterType::Lanczos3);
    let mask = feathered_mask(width, height, feather);

    for (pixel, alpha) in resized.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }

    resized
}

/// Blend `overlay` onto `base` at `(x, y)` weighted by the overlay's alpha.
/// Overlay pixels falling outside `base` are dropped.
pub fn alpha_blend(base: &mut RgbImage, overlay: &RgbaImage, x: u32, y: u32) {
    let (base_width, base_height) = base.dimensions();

    for (ox, oy, source) in overlay.enumerate_pixels() {
        let (bx, by) = (x + ox, y + oy);
        if bx >= base_width || by >= base_height {
            continue;
        }

        let alpha = source[3] as u32;
        if alpha == 0 {
            continue;
        }

        let target = base.get_pixel_mut(bx, by);
        for channel in 0..3 {
            let blended = source[channel] as u32 * alpha + target[channel] as u32 * (255 - alpha);
            target[channel] = ((blended + 127) / 255) as u8;
        }
    }
}

/// Scale every channel of the image by a flat factor.
///
/// Crude colour matching: the template is not sampled.
pub fn adjust_brightness(image: &mut RgbImage, factor: f32) {
    let row_len = image.width() as usize * 3;
    if row_len == 0 {
        return;
    }

    let subpixels: &mut [u8] = &mut *image;
    subpixels.par_chunks_mut(row_len).for_each(|row| {
        for value in row.iter_mut() {
            *value = (*value as f32 * factor).min(255.0) as u8;
        }
    });
}
