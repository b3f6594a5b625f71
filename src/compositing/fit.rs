/// Largest `(width, height)` with the source aspect ratio that fits inside
/// `target`. At least one side matches the target exactly.
///
/// The other side is rounded to the nearest pixel, so it may be zero for
/// extreme aspect ratios; callers check before resampling.
pub fn aspect_fit(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (source_width, source_height) = source;
    let (target_width, target_height) = target;

    let source_aspect = source_width as f64 / source_height as f64;
    let target_aspect = target_width as f64 / target_height as f64;

    if source_aspect > target_aspect {
        // Relatively wider than the box: width is the constraint
        let height = (target_width as f64 / source_aspect).round() as u32;
        (target_width, height.min(target_height))
    } else {
        let width = (target_height as f64 * source_aspect).round() as u32;
        (width.min(target_width), target_height)
    }
}
