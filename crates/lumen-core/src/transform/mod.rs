//! Geometric transforms: rotation, flips and cropping.
//!
//! Transforms run before any color adjustment.
//!
//! # Transform Order
//!
//! When several transforms are requested together they always run in this
//! order, no matter which setting the user changed last:
//! 1. Rotation
//! 2. Horizontal flip
//! 3. Vertical flip
//! 4. Crop (relative to the rotated, flipped frame)
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop coordinates are normalized (0.0 to 1.0)
//! - Origin is top-left corner

mod crop;
mod flip;
mod rotation;

use tracing::debug;

use crate::bitmap::Bitmap;
use crate::settings::TransformSettings;

pub use crop::{apply_crop, crop_bounds};
pub use flip::{flip_horizontal, flip_vertical};
pub use rotation::{apply_rotation, compute_rotated_bounds};

/// Apply all geometric transforms in their fixed order.
pub fn apply_transforms(bitmap: &Bitmap, settings: &TransformSettings) -> Bitmap {
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        rotation = settings.rotation,
        flip_horizontal = settings.flip_horizontal,
        flip_vertical = settings.flip_vertical,
        "Applying transforms"
    );

    let mut out = apply_rotation(bitmap, settings.rotation);
    if settings.flip_horizontal {
        out = flip_horizontal(&out);
    }
    if settings.flip_vertical {
        out = flip_vertical(&out);
    }
    apply_crop(&out, &settings.crop)
}
