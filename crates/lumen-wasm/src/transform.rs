//! WASM bindings for image transformation operations.
//!
//! This module provides JavaScript bindings for rotation, flip and crop,
//! so the crop tool can preview geometry without running the full pipeline.

use crate::types::JsBitmap;
use lumen_core::transform::{
    apply_crop as core_crop, apply_rotation as core_rotate, flip_horizontal as core_flip_h,
    flip_vertical as core_flip_v,
};
use lumen_core::CropRect;
use wasm_bindgen::prelude::*;

/// Apply rotation to a bitmap.
///
/// The bitmap is rotated around its center. The output canvas is expanded
/// to fit the entire rotated image; uncovered corners are transparent.
///
/// # Arguments
///
/// * `bitmap` - Source bitmap to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = apply_rotation(source, 15.0);
/// ```
#[wasm_bindgen]
pub fn apply_rotation(bitmap: &JsBitmap, angle_degrees: f64) -> JsBitmap {
    JsBitmap::from_core(core_rotate(bitmap.as_core(), angle_degrees))
}

/// Apply crop to a bitmap using normalized coordinates.
///
/// Crops a region from the bitmap using coordinates in the range [0, 1],
/// where (0, 0) is the top-left corner and (1, 1) is the bottom-right corner.
///
/// # Arguments
///
/// * `bitmap` - Source bitmap to crop
/// * `left` - Left edge position (0.0 to 1.0)
/// * `top` - Top edge position (0.0 to 1.0)
/// * `width` - Crop region width (0.0 to 1.0)
/// * `height` - Crop region height (0.0 to 1.0)
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Crop the center 50% of the image
/// const cropped = apply_crop(source, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_crop(bitmap: &JsBitmap, left: f64, top: f64, width: f64, height: f64) -> JsBitmap {
    let rect = CropRect::new(left, top, width, height);
    JsBitmap::from_core(core_crop(bitmap.as_core(), &rect))
}

/// Mirror a bitmap left to right.
#[wasm_bindgen]
pub fn flip_horizontal(bitmap: &JsBitmap) -> JsBitmap {
    JsBitmap::from_core(core_flip_h(bitmap.as_core()))
}

/// Mirror a bitmap top to bottom.
#[wasm_bindgen]
pub fn flip_vertical(bitmap: &JsBitmap) -> JsBitmap {
    JsBitmap::from_core(core_flip_v(bitmap.as_core()))
}
