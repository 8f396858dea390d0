//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use image::metadata::Orientation;

/// Calculate thumbnail dimensions for a fixed target width.
///
/// The height follows the source aspect ratio, rounded to the nearest pixel
/// and never below 1. When `upscale` is false, a source that is already no
/// wider than `target_width` keeps its native size.
///
/// # Examples
/// ```
/// # use static_gallery::imaging::calculate_thumbnail_dimensions;
/// assert_eq!(calculate_thumbnail_dimensions((100, 50), 50, false), (50, 25));
/// assert_eq!(calculate_thumbnail_dimensions((40, 30), 50, false), (40, 30));
/// assert_eq!(calculate_thumbnail_dimensions((40, 30), 80, true), (80, 60));
/// ```
pub fn calculate_thumbnail_dimensions(
    original: (u32, u32),
    target_width: u32,
    upscale: bool,
) -> (u32, u32) {
    let (orig_w, orig_h) = original;

    if orig_w == 0 || orig_h == 0 || target_width == 0 {
        return original;
    }
    if orig_w <= target_width && !upscale {
        return original;
    }

    let ratio = target_width as f64 / orig_w as f64;
    let height = ((orig_h as f64 * ratio).round() as u32).max(1);
    (target_width, height)
}

/// Dimensions as displayed once `orientation` has been applied.
///
/// Orientations that rotate by a quarter turn swap width and height.
pub fn oriented_dimensions(stored: (u32, u32), orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Rotate90
        | Orientation::Rotate270
        | Orientation::Rotate90FlipH
        | Orientation::Rotate270FlipH => (stored.1, stored.0),
        _ => stored,
    }
}
