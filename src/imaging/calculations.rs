//! Pure calculation functions for the ratio decision and crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::CropGeometry;

/// Target ratio for landscape images (4:3).
pub const LANDSCAPE_RATIO: f64 = 4.0 / 3.0;

/// Target ratio for portrait and square images (3:4).
pub const PORTRAIT_RATIO: f64 = 3.0 / 4.0;

/// Ratios closer than this to the target are left uncropped.
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Pick the target ratio for an image's orientation.
///
/// Anything wider than tall aims for 4:3; portrait and square images aim
/// for 3:4.
///
/// # Examples
/// ```
/// # use wide_evo::imaging::calculations::{target_ratio, LANDSCAPE_RATIO, PORTRAIT_RATIO};
/// assert_eq!(target_ratio(16.0 / 9.0), LANDSCAPE_RATIO);
/// assert_eq!(target_ratio(1.0), PORTRAIT_RATIO);
/// ```
pub fn target_ratio(current: f64) -> f64 {
    if current > 1.0 {
        LANDSCAPE_RATIO
    } else {
        PORTRAIT_RATIO
    }
}

/// Whether `current` is already within tolerance of `target`.
pub fn is_conforming(current: f64, target: f64) -> bool {
    (current - target).abs() < RATIO_TOLERANCE
}

/// Calculate the centered crop that brings `dims` to its target ratio.
///
/// Returns `None` when the image already conforms and only needs a
/// re-encode.
///
/// - Too wide: full height is kept, width becomes `round(height × target)`.
/// - Too tall: full width is kept, height becomes `round(width / target)`.
///
/// Offsets split the removed pixels evenly; with an odd remainder the
/// extra pixel goes to the right (or bottom) margin.
pub fn calculate_crop(dims: Dimensions) -> Option<CropGeometry> {
    let Dimensions { width, height } = dims;
    let current = dims.ratio();
    let target = target_ratio(current);

    if is_conforming(current, target) {
        return None;
    }

    let (crop_w, crop_h) = if current > target {
        let w = (height as f64 * target).round() as u32;
        (w.min(width), height)
    } else {
        let h = (width as f64 / target).round() as u32;
        (width, h.min(height))
    };

    Some(CropGeometry {
        width: crop_w,
        height: crop_h,
        x: (width - crop_w) / 2,
        y: (height - crop_h) / 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    // =========================================================================
    // target_ratio / is_conforming
    // =========================================================================

    #[test]
    fn landscape_targets_four_three() {
        assert_eq!(target_ratio(2.0), LANDSCAPE_RATIO);
    }

    #[test]
    fn portrait_targets_three_four() {
        assert_eq!(target_ratio(0.5), PORTRAIT_RATIO);
    }

    #[test]
    fn square_counts_as_portrait() {
        assert_eq!(target_ratio(1.0), PORTRAIT_RATIO);
    }

    #[test]
    fn conforming_within_tolerance() {
        assert!(is_conforming(1.34, LANDSCAPE_RATIO));
        assert!(!is_conforming(1.35, LANDSCAPE_RATIO));
    }

    // =========================================================================
    // calculate_crop
    // =========================================================================

    #[test]
    fn exact_four_three_needs_no_crop() {
        assert_eq!(calculate_crop(dims(4000, 3000)), None);
    }

    #[test]
    fn exact_three_four_needs_no_crop() {
        assert_eq!(calculate_crop(dims(3000, 4000)), None);
    }

    #[test]
    fn near_four_three_needs_no_crop() {
        // 1.3360 vs 1.3333
        assert_eq!(calculate_crop(dims(1336, 1000)), None);
    }

    #[test]
    fn wide_landscape_crops_width() {
        let crop = calculate_crop(dims(2000, 1000)).unwrap();
        assert_eq!(crop.width, 1333); // round(1000 * 4/3)
        assert_eq!(crop.height, 1000);
        assert_eq!(crop.y, 0);
    }

    #[test]
    fn wide_landscape_is_horizontally_centered() {
        let crop = calculate_crop(dims(2000, 1000)).unwrap();
        let left = crop.x;
        let right = 2000 - crop.x - crop.width;
        assert!(left.abs_diff(right) <= 1, "left={left} right={right}");
    }

    #[test]
    fn tall_portrait_crops_height() {
        let crop = calculate_crop(dims(1000, 2000)).unwrap();
        assert_eq!(crop.width, 1000);
        assert_eq!(crop.height, 1333); // round(1000 * 4/3)
        assert_eq!(crop.x, 0);
    }

    #[test]
    fn tall_portrait_is_vertically_centered() {
        let crop = calculate_crop(dims(1000, 2000)).unwrap();
        let top = crop.y;
        let bottom = 2000 - crop.y - crop.height;
        assert!(top.abs_diff(bottom) <= 1, "top={top} bottom={bottom}");
    }

    #[test]
    fn landscape_between_four_three_and_square_crops_height() {
        // 1200x1000 (1.2) is narrower than 4:3 → keep width, 1200 / (4/3) = 900
        let crop = calculate_crop(dims(1200, 1000)).unwrap();
        assert_eq!((crop.width, crop.height), (1200, 900));
        assert_eq!((crop.x, crop.y), (0, 50));
    }

    #[test]
    fn square_crops_to_three_four() {
        let crop = calculate_crop(dims(1000, 1000)).unwrap();
        assert_eq!((crop.width, crop.height), (750, 1000));
        assert_eq!((crop.x, crop.y), (125, 0));
    }

    #[test]
    fn sixteen_nine_phone_shot() {
        let crop = calculate_crop(dims(1920, 1080)).unwrap();
        assert_eq!((crop.width, crop.height), (1440, 1080));
        assert_eq!(crop.x, 240);
    }
}
