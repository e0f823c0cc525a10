//! Unsharp mask sharpening and clarity.
//!
//! Both boost the difference between a pixel and its gaussian-blurred
//! neighborhood. Sharpening is gated by a threshold so flat, noisy regions are
//! left alone; clarity has no gate and accepts negative amounts to smooth.

use tracing::debug;

use super::blur::{blur_plane, check_radius};
use crate::bitmap::Bitmap;
use crate::error::{Error, Result};

/// Blur radius used for clarity, in pixels.
pub const CLARITY_RADIUS: f32 = 8.0;

/// Sharpen one channel value.
///
/// `amount` is a plain multiplier and `threshold` is in the same domain as
/// the values. Differences below the threshold leave the value unchanged.
#[inline]
pub fn unsharp_channel(original: f32, blurred: f32, amount: f32, threshold: f32) -> f32 {
    let diff = original - blurred;
    if diff.abs() < threshold {
        original
    } else {
        original + diff * amount
    }
}

/// Local contrast for one channel value. Negative amounts smooth.
#[inline]
pub fn clarity_channel(original: f32, blurred: f32, amount: f32) -> f32 {
    original + (original - blurred) * amount
}

/// Sharpen a bitmap with an unsharp mask. Alpha is copied unchanged.
///
/// * `amount` - strength, 0 to 150 (100 doubles the local difference)
/// * `radius` - blur radius in pixels
/// * `threshold` - minimum difference to sharpen, in byte units (0 to 255)
///
/// # Errors
/// [`Error::InvalidParameter`] if any argument is negative or not finite, or
/// `radius` exceeds [`super::blur::MAX_BLUR_RADIUS`].
pub fn unsharp_mask(bitmap: &Bitmap, amount: f32, radius: f32, threshold: f32) -> Result<Bitmap> {
    check_radius(radius)?;
    for (name, value) in [("amount", amount), ("threshold", threshold)] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "unsharp mask {} must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        amount,
        radius,
        threshold,
        "Unsharp mask"
    );
    if amount == 0.0 {
        return Ok(bitmap.clone());
    }

    let rgb = bitmap.to_normalized_rgb();
    let blurred = blur_plane(
        &rgb,
        bitmap.width() as usize,
        bitmap.height() as usize,
        3,
        radius,
    );
    let factor = amount / 100.0;
    let gate = threshold / 255.0;
    let sharpened: Vec<f32> = rgb
        .iter()
        .zip(&blurred)
        .map(|(&o, &b)| unsharp_channel(o, b, factor, gate))
        .collect();
    Ok(Bitmap::from_normalized_rgb(&sharpened, bitmap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsharp_formula() {
        let v = unsharp_channel(0.6, 0.5, 1.0, 0.0);
        assert!((v - 0.7).abs() < 1e-6);
        let v = unsharp_channel(0.4, 0.5, 0.5, 0.0);
        assert!((v - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_gate() {
        // |0.52 - 0.5| = 0.02 is below the gate
        assert_eq!(unsharp_channel(0.52, 0.5, 2.0, 0.05), 0.52);
        // 0.1 clears it
        assert!(unsharp_channel(0.6, 0.5, 2.0, 0.05) > 0.6);
    }

    #[test]
    fn test_clarity_negative_smooths() {
        let v = clarity_channel(0.8, 0.5, -0.5);
        assert!((v - 0.65).abs() < 1e-6);
        assert_eq!(clarity_channel(0.5, 0.5, 1.0), 0.5);
    }

    fn edge_bitmap() -> Bitmap {
        // Left half dark, right half bright
        let mut pixels = Vec::new();
        for _y in 0..6 {
            for x in 0..8 {
                let v = if x < 4 { 60 } else { 190 };
                pixels.extend_from_slice(&[v, v, v, 200]);
            }
        }
        Bitmap::new(8, 6, pixels).unwrap()
    }

    #[test]
    fn test_unsharp_mask_increases_edge_contrast() {
        let bmp = edge_bitmap();
        let out = unsharp_mask(&bmp, 100.0, 1.0, 0.0).unwrap();
        assert!(out.pixel(3, 2)[0] < 60);
        assert!(out.pixel(4, 2)[0] > 190);
        // Far from the edge nothing changes
        assert_eq!(out.pixel(0, 2)[0], 60);
        assert_eq!(out.pixel(7, 2)[0], 190);
        assert_eq!(out.pixel(4, 2)[3], 200);
    }

    #[test]
    fn test_unsharp_mask_high_threshold_is_noop() {
        let bmp = edge_bitmap();
        let out = unsharp_mask(&bmp, 150.0, 1.0, 255.0).unwrap();
        assert_eq!(out, bmp);
    }

    #[test]
    fn test_unsharp_mask_rejects_bad_args() {
        let bmp = edge_bitmap();
        assert!(unsharp_mask(&bmp, -1.0, 1.0, 0.0).is_err());
        assert!(unsharp_mask(&bmp, 50.0, f32::INFINITY, 0.0).is_err());
        assert!(unsharp_mask(&bmp, 50.0, 1e9, 0.0).is_err());
        assert!(unsharp_mask(&bmp, 50.0, 1.0, -3.0).is_err());
        assert_eq!(unsharp_mask(&bmp, 0.0, 1.0, 0.0).unwrap(), bmp);
    }
}
