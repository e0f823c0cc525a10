//! Image cropping with normalized coordinates.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner
//! - width/height are relative to the input dimensions

use crate::bitmap::{Bitmap, CHANNELS};
use crate::settings::CropRect;

/// Pixel bounds `(left, top, width, height)` of a normalized crop rectangle.
///
/// The left/top edge is rounded and kept inside the image. The right/bottom
/// edge is clamped to the image, so a request that runs past the border is
/// shortened rather than shifted. The result is always at least 1x1.
pub fn crop_bounds(width: u32, height: u32, crop: &CropRect) -> (u32, u32, u32, u32) {
    let src_w = width as f64;
    let src_h = height as f64;

    let px_left = (crop.x.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_top = (crop.y.clamp(0.0, 1.0) * src_h).round() as u32;
    let px_width = (crop.width.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_height = (crop.height.clamp(0.0, 1.0) * src_h).round() as u32;

    let px_left = px_left.min(width.saturating_sub(1));
    let px_top = px_top.min(height.saturating_sub(1));
    let px_right = (px_left + px_width).min(width);
    let px_bottom = (px_top + px_height).min(height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    (px_left, px_top, out_width, out_height)
}

/// Crop a bitmap to a normalized rectangle. Returns a new bitmap.
///
/// A full-frame rectangle returns a copy of the input.
pub fn apply_crop(bitmap: &Bitmap, crop: &CropRect) -> Bitmap {
    if crop.is_full() {
        return bitmap.clone();
    }

    let (left, top, out_width, out_height) = crop_bounds(bitmap.width(), bitmap.height(), crop);
    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in top..top + out_height {
        let start = bitmap.index(left, y);
        output.extend_from_slice(&bitmap.pixels()[start..start + row_bytes]);
    }

    Bitmap::from_parts(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=100, 1u32..=100)
    }

    fn crop_strategy() -> impl Strategy<Value = CropRect> {
        (-0.5f64..=1.5, -0.5f64..=1.5, 0.0f64..=1.5, 0.0f64..=1.5)
            .prop_map(|(x, y, w, h)| CropRect::new(x, y, w, h))
    }

    fn create_test_image(width: u32, height: u32) -> Bitmap {
        let pixels = (0..width * height)
            .flat_map(|i| {
                let v = (i % 256) as u8;
                [v, v, v, 255]
            })
            .collect();
        Bitmap::new(width, height, pixels).unwrap()
    }

    proptest! {
        /// Property: output is at least 1x1 and never larger than the input.
        #[test]
        fn prop_output_bounded(
            (width, height) in dimensions_strategy(),
            crop in crop_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, &crop);

            prop_assert!(result.width() >= 1 && result.width() <= width);
            prop_assert!(result.height() >= 1 && result.height() <= height);
            prop_assert_eq!(
                result.pixels().len(),
                result.pixel_count() * CHANNELS
            );
        }

        /// Property: the region stays inside the source.
        #[test]
        fn prop_bounds_inside_source(
            (width, height) in dimensions_strategy(),
            crop in crop_strategy(),
        ) {
            let (left, top, w, h) = crop_bounds(width, height, &crop);
            prop_assert!(left + w <= width);
            prop_assert!(top + h <= height);
        }

        /// Property: the first output pixel is the source pixel at (left, top).
        #[test]
        fn prop_origin_pixel(
            (width, height) in dimensions_strategy(),
            crop in crop_strategy(),
        ) {
            let img = create_test_image(width, height);
            let (left, top, _, _) = crop_bounds(width, height, &crop);
            let result = apply_crop(&img, &crop);
            prop_assert_eq!(result.pixel(0, 0), img.pixel(left, top));
        }
    }
}
