use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use crate::{
    error::Result,
    stylization::{StylePrompt, Stylizer},
};

/// Local fallback used when no generative backend is available.
///
/// It does not illustrate anything: colours are pushed away from grey and
/// the tonal range is stretched a little around the mean luma.
pub struct BasicEnhancement {
    saturation: f32,
    contrast: f32,
}

impl BasicEnhancement {
    pub fn new() -> Self {
        Self {
            saturation: 1.2,
            contrast: 1.1,
        }
    }

    pub fn with_factors(saturation: f32, contrast: f32) -> Self {
        Self { saturation, contrast }
    }

    /// Blend each pixel away from (factor > 1) or toward its own grey
    fn apply_saturation(&self, image: &mut RgbImage, factor: f32) {
        for pixel in image.pixels_mut() {
            let gray = luma(pixel) as f32;
            for channel in 0..3 {
                pixel[channel] = mix(gray, pixel[channel] as f32, factor);
            }
        }
    }

    /// Blend every pixel away from (factor > 1) or toward the mean grey
    fn apply_contrast(&self, image: &mut RgbImage, factor: f32) {
        let pixel_count = image.width() as u64 * image.height() as u64;
        if pixel_count == 0 {
            return;
        }

        let total: u64 = image.pixels().map(|p| luma(p) as u64).sum();
        let mean = ((total as f64 / pixel_count as f64) + 0.5).floor() as f32;

        for pixel in image.pixels_mut() {
            for channel in 0..3 {
                pixel[channel] = mix(mean, pixel[channel] as f32, factor);
            }
        }
    }
}

impl Default for BasicEnhancement {
    fn default() -> Self {
        Self::new()
    }
}

/// ITU-R 601-2 luma, fixed point
fn luma(pixel: &Rgb<u8>) -> u8 {
    let weighted = pixel[0] as u32 * 19595 + pixel[1] as u32 * 38470 + pixel[2] as u32 * 7471;
    ((weighted + 0x8000) >> 16) as u8
}

fn mix(base: f32, value: f32, factor: f32) -> u8 {
    (base + factor * (value - base)).round().clamp(0.0, 255.0) as u8
}

impl Stylizer for BasicEnhancement {
    fn name(&self) -> &str {
        "basic"
    }

    fn description(&self) -> &str {
        "Local saturation and contrast boost; no generative model involved"
    }

    fn stylize(&self, face: &DynamicImage, _prompt: &StylePrompt) -> Result<DynamicImage> {
        debug!(
            "Basic enhancement: saturation x{:.2}, contrast x{:.2}",
            self.saturation, self.contrast
        );

        let mut image = face.to_rgb8();
        self.apply_saturation(&mut image, self.saturation);
        self.apply_contrast(&mut image, self.contrast);

        Ok(DynamicImage::ImageRgb8(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn spread(image: &RgbImage) -> i32 {
        let lumas: Vec<i32> = image.pixels().map(|p| luma(p) as i32).collect();
        lumas.iter().max().unwrap() - lumas.iter().min().unwrap()
    }

    #[test]
    fn test_preserves_dimensions() {
        let face = DynamicImage::ImageRgb8(RgbImage::from_pixel(31, 17, Rgb([120, 80, 60])));
        let styled = BasicEnhancement::new()
            .stylize(&face, &StylePrompt::default())
            .unwrap();
        assert_eq!(styled.dimensions(), (31, 17));
    }

    #[test]
    fn test_gray_stays_gray() {
        let face = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])));
        let styled = BasicEnhancement::new()
            .stylize(&face, &StylePrompt::default())
            .unwrap()
            .to_rgb8();
        assert!(styled.pixels().all(|p| *p == Rgb([128, 128, 128])));
    }

    #[test]
    fn test_saturation_pushes_away_from_gray() {
        let mut image = RgbImage::from_pixel(1, 1, Rgb([150, 100, 100]));
        BasicEnhancement::new().apply_saturation(&mut image, 1.2);

        let pixel = image.get_pixel(0, 0);
        assert!(pixel[0] > 150);
        assert!(pixel[1] < 100);
    }

    #[test]
    fn test_contrast_widens_range() {
        let face = RgbImage::from_fn(10, 1, |x, _| {
            let v = 80 + x as u8 * 10;
            Rgb([v, v, v])
        });
        let before = spread(&face);

        let styled = BasicEnhancement::with_factors(1.0, 1.5)
            .stylize(&DynamicImage::ImageRgb8(face), &StylePrompt::default())
            .unwrap()
            .to_rgb8();
        assert!(spread(&styled) > before);
    }

    #[test]
    fn test_alpha_input_is_flattened() {
        let face = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40])));
        let styled = BasicEnhancement::new()
            .stylize(&face, &StylePrompt::default())
            .unwrap();
        assert!(matches!(styled, DynamicImage::ImageRgb8(_)));
    }
}
