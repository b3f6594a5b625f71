use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use crate::compositing::compositor::{alpha_blend, masked_face};

/// Side length of the synthesized canvas.
pub const FALLBACK_SIZE: u32 = 1024;

const BACKGROUND: Rgb<u8> = Rgb([240, 248, 255]);
const ORNAMENT_COLOR: Rgb<u8> = Rgb([255, 200, 200]);
const ORNAMENT_COUNT: i64 = 5;
const ORNAMENT_SPACING: i64 = 150;
const ORNAMENT_RADIUS: i64 = 30;

/// Build a stand-in template when no artwork is available: a pale canvas
/// with a row of dots across the top quarter and the face blended,
/// unconditionally squared, into the centre.
///
/// No brightness adjustment is applied on this path.
pub fn synthesize_template(face: &DynamicImage, feather: u32) -> RgbImage {
    let (width, height) = (FALLBACK_SIZE, FALLBACK_SIZE);
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let centre_x = (width / 2) as i64;
    let row_y = (height / 4) as i64;
    for i in 0..ORNAMENT_COUNT {
        let x = centre_x + (i - ORNAMENT_COUNT / 2) * ORNAMENT_SPACING;
        fill_circle(&mut canvas, x, row_y, ORNAMENT_RADIUS, ORNAMENT_COLOR);
    }

    let face_size = width.min(height) / 2;
    let overlay = masked_face(face, face_size, face_size, feather);
    let paste_x = (width - face_size) / 2;
    let paste_y = (height - face_size) / 2;

    debug!("Fallback canvas: {}px face at ({}, {})", face_size, paste_x, paste_y);
    alpha_blend(&mut canvas, &overlay, paste_x, paste_y);

    canvas
}

fn fill_circle(canvas: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);

    for y in (cy - radius).max(0)..=(cy + radius).min(height - 1) {
        for x in (cx - radius).max(0)..=(cx + radius).min(width - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
