use image::{imageops, GrayImage, Luma};

/// Default width of the feathered border band, in pixels.
pub const DEFAULT_FEATHER_SIZE: u32 = 20;

/// Build the unblurred feather ramp for a `width` x `height` mask.
///
/// Interior pixels are fully opaque. Within `feather` pixels of an edge the
/// opacity climbs linearly from 0 on the outermost pixel, and where two
/// edges' bands overlap (corners, or a band wider than half the mask) the
/// lower value wins.
pub fn feather_ramp(width: u32, height: u32, feather: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let distance = x
            .min(width - 1 - x)
            .min(y)
            .min(height - 1 - y);

        let alpha = if distance < feather {
            (255 * distance / feather) as u8
        } else {
            255
        };

        Luma([alpha])
    })
}

/// Feathered blend mask: the linear ramp smoothed with a Gaussian blur of
/// radius `feather / 4` so the band edges do not show as steps.
pub fn feathered_mask(width: u32, height: u32, feather: u32) -> GrayImage {
    let ramp = feather_ramp(width, height, feather);

    let radius = feather / 4;
    if radius == 0 || width == 0 || height == 0 {
        return ramp;
    }

    imageops::blur(&ramp, radius as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_values_at_reference_points() {
        let ramp = feather_ramp(100, 100, 20);
        assert_eq!(ramp.get_pixel(0, 50)[0], 0);
        assert_eq!(ramp.get_pixel(10, 50)[0], 127);
        assert_eq!(ramp.get_pixel(19, 50)[0], 242);
        assert_eq!(ramp.get_pixel(20, 50)[0], 255);
        assert_eq!(ramp.get_pixel(50, 50)[0], 255);
        assert_eq!(ramp.get_pixel(99, 50)[0], 0);
    }

    #[test]
    fn corners_take_the_lower_ramp() {
        let ramp = feather_ramp(100, 100, 20);
        // 5 px from the left, 2 px from the top
        assert_eq!(ramp.get_pixel(5, 2)[0], (255 * 2 / 20) as u8);
    }

    #[test]
    fn ramp_is_monotone_toward_interior() {
        let (width, height, feather) = (120, 80, 20);
        let ramp = feather_ramp(width, height, feather);

        let y = height / 2;
        for x in 1..=feather {
            assert!(ramp.get_pixel(x, y)[0] >= ramp.get_pixel(x - 1, y)[0]);
        }
        for x in feather..width - feather {
            assert_eq!(ramp.get_pixel(x, y)[0], 255);
        }

        let x = width / 2;
        for y in 1..=feather {
            assert!(ramp.get_pixel(x, y)[0] >= ramp.get_pixel(x, y - 1)[0]);
            let from_bottom = height - 1 - y;
            assert!(ramp.get_pixel(x, from_bottom)[0] >= ramp.get_pixel(x, from_bottom + 1)[0]);
        }
    }

    #[test]
    fn oversized_feather_does_not_wrap() {
        let ramp = feather_ramp(10, 6, 20);
        assert_eq!(ramp.dimensions(), (10, 6));
        // Centre rows are at most 2 px from an edge
        assert_eq!(ramp.get_pixel(5, 2)[0], (255 * 2 / 20) as u8);
        assert_eq!(ramp.get_pixel(0, 0)[0], 0);
        assert!(ramp.pixels().all(|p| p[0] < 255));
    }

    #[test]
    fn blurred_mask_keeps_dimensions_and_interior() {
        let mask = feathered_mask(100, 100, 20);
        assert_eq!(mask.dimensions(), (100, 100));
        assert_eq!(mask.get_pixel(50, 50)[0], 255);
        assert!(mask.get_pixel(0, 50)[0] < 64);
    }

    #[test]
    fn small_feather_skips_blur() {
        let mask = feathered_mask(30, 30, 3);
        assert_eq!(mask, feather_ramp(30, 30, 3));
    }

    #[test]
    fn zero_feather_is_fully_opaque() {
        let mask = feathered_mask(8, 8, 0);
        assert!(mask.pixels().all(|p| p[0] == 255));
    }
}
