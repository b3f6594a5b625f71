//! # Face Restoration
//!
//! Optional detail recovery between stylization and compositing. A real
//! restoration model plugs in behind [`Restorer`]; the crate provides a
//! passthrough and a light unsharp-mask restorer.

use image::{imageops, DynamicImage};
use tracing::debug;

use crate::{config::RestorationConfig, error::Result};

/// Capability provider that enhances a stylized face
pub trait Restorer: Send + Sync {
    fn name(&self) -> &str;

    /// Return an enhanced face with the same content and dimensions
    fn restore(&self, face: &DynamicImage) -> Result<DynamicImage>;
}

/// Used when restoration is disabled or no model is available
pub struct PassthroughRestorer;

impl Restorer for PassthroughRestorer {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn restore(&self, face: &DynamicImage) -> Result<DynamicImage> {
        Ok(face.clone())
    }
}

/// Sharpens edges the stylizer softened
pub struct UnsharpRestorer {
    sigma: f32,
    threshold: i32,
}

impl UnsharpRestorer {
    pub fn new(sigma: f32, threshold: i32) -> Self {
        Self { sigma, threshold }
    }
}

impl Restorer for UnsharpRestorer {
    fn name(&self) -> &str {
        "unsharp"
    }

    fn restore(&self, face: &DynamicImage) -> Result<DynamicImage> {
        debug!("Unsharp mask: sigma {:.2}, threshold {}", self.sigma, self.threshold);
        let sharpened = imageops::unsharpen(&face.to_rgb8(), self.sigma, self.threshold);
        Ok(DynamicImage::ImageRgb8(sharpened))
    }
}

/// Pick the restorer described by the configuration
pub fn restorer_from_config(config: &RestorationConfig) -> Box<dyn Restorer> {
    if config.enabled {
        Box::new(UnsharpRestorer::new(config.sigma, config.threshold))
    } else {
        Box::new(PassthroughRestorer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn step_edge() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(20, 20, |x, _| {
            if x < 10 { Rgb([80, 80, 80]) } else { Rgb([160, 160, 160]) }
        }))
    }

    #[test]
    fn test_passthrough_returns_input() {
        let face = step_edge();
        let restored = PassthroughRestorer.restore(&face).unwrap();
        assert_eq!(restored.to_rgb8(), face.to_rgb8());
    }

    #[test]
    fn test_unsharp_keeps_size_and_touches_only_edges() {
        let face = step_edge();
        let restored = UnsharpRestorer::new(1.0, 2).restore(&face).unwrap();
        assert_eq!(restored.dimensions(), (20, 20));

        let pixels = restored.to_rgb8();
        assert_eq!(pixels.get_pixel(0, 10)[0], 80);
        assert_eq!(pixels.get_pixel(19, 10)[0], 160);
        assert_ne!(pixels.get_pixel(9, 10)[0], 80);
    }

    #[test]
    fn test_restorer_from_config() {
        let mut config = RestorationConfig::default();
        assert_eq!(restorer_from_config(&config).name(), "unsharp");

        config.enabled = false;
        assert_eq!(restorer_from_config(&config).name(), "passthrough");
    }
}
