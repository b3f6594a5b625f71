/// Share of the template width/height given to the face, in percent.
const REGION_SIZE_PERCENT: u32 = 30;

/// Top edge of the face region, in percent of the template height.
/// Portrait templates put the face in the upper middle.
const REGION_TOP_PERCENT: u32 = 25;

/// Placement rectangle for the face, in template pixel coordinates.
///
/// `x2`/`y2` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl FaceRegion {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// Estimate where the face goes in a template of the given size.
///
/// Pure function of the dimensions; the template's pixels are never looked
/// at. Very small templates can yield an empty region.
pub fn estimate_face_region(width: u32, height: u32) -> FaceRegion {
    let face_width = (width as u64 * REGION_SIZE_PERCENT as u64 / 100) as u32;
    let face_height = (height as u64 * REGION_SIZE_PERCENT as u64 / 100) as u32;

    let x1 = (width - face_width) / 2;
    let y1 = (height as u64 * REGION_TOP_PERCENT as u64 / 100) as u32;

    FaceRegion {
        x1,
        y1,
        x2: x1 + face_width,
        y2: y1 + face_height,
    }
}
