//! Separable gaussian blur with edge-replicate boundaries.

use tracing::{debug, trace};

use crate::bitmap::Bitmap;
use crate::error::{Error, Result};
use crate::rows::for_each_row;

/// Largest blur radius in pixels accepted by the bitmap-level filters.
pub const MAX_BLUR_RADIUS: f32 = 250.0;

/// Normalized 1D gaussian kernel for a blur radius in pixels.
///
/// `sigma = radius / 3` and the kernel has `2 * ceil(radius * 3) + 1` taps.
/// A radius of zero (or less) gives the single-tap identity kernel. Radii
/// above [`MAX_BLUR_RADIUS`] are treated as that maximum.
pub fn gaussian_kernel(radius: f32) -> Vec<f32> {
    if radius.is_nan() || radius <= 0.0 {
        return vec![1.0];
    }
    let radius = radius.min(MAX_BLUR_RADIUS);
    let sigma = radius / 3.0;
    let half = (radius * 3.0).ceil() as usize;
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..=2 * half)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / denom).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for k in kernel.iter_mut() {
        *k /= sum;
    }
    kernel
}

/// Blur an interleaved buffer with `channels` values per pixel.
///
/// Horizontal pass first, then a vertical pass over the complete horizontal
/// result. Samples past the border reuse the nearest edge pixel.
pub fn blur_plane(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: f32,
) -> Vec<f32> {
    debug_assert_eq!(data.len(), width * height * channels);
    let kernel = gaussian_kernel(radius);
    trace!(radius, taps = kernel.len(), "Gaussian kernel");
    if kernel.len() == 1 {
        return data.to_vec();
    }
    let half = (kernel.len() / 2) as isize;
    let row_len = width * channels;

    let mut horizontal = vec![0.0f32; data.len()];
    for_each_row(&mut horizontal, row_len, |y, row| {
        let src = &data[y * row_len..(y + 1) * row_len];
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = (x as isize + k as isize - half).clamp(0, width as isize - 1) as usize;
                    sum += src[sx * channels + c] * weight;
                }
                row[x * channels + c] = sum;
            }
        }
    });

    let mut out = vec![0.0f32; data.len()];
    for_each_row(&mut out, row_len, |y, row| {
        for (i, value) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, height as isize - 1) as usize;
                sum += horizontal[sy * row_len + i] * weight;
            }
            *value = sum;
        }
    });
    out
}

/// Gaussian-blur the RGB channels of a bitmap. Alpha is copied unchanged.
///
/// # Errors
/// [`Error::InvalidParameter`] if `radius` is not in `0..=MAX_BLUR_RADIUS`.
pub fn gaussian_blur(bitmap: &Bitmap, radius: f32) -> Result<Bitmap> {
    check_radius(radius)?;
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        radius,
        "Gaussian blur"
    );
    let rgb = bitmap.to_normalized_rgb();
    let blurred = blur_plane(
        &rgb,
        bitmap.width() as usize,
        bitmap.height() as usize,
        3,
        radius,
    );
    Ok(Bitmap::from_normalized_rgb(&blurred, bitmap))
}

/// Reject radii outside `0..=MAX_BLUR_RADIUS`, including NaN.
pub(crate) fn check_radius(radius: f32) -> Result<()> {
    if (0.0..=MAX_BLUR_RADIUS).contains(&radius) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "blur radius must be between 0 and {}, got {}",
            MAX_BLUR_RADIUS, radius
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_size_and_sum() {
        let kernel = gaussian_kernel(1.0);
        assert_eq!(kernel.len(), 7);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);

        assert_eq!(gaussian_kernel(8.0).len(), 49);
        assert_eq!(gaussian_kernel(0.5).len(), 5);
    }

    #[test]
    fn test_kernel_symmetric_and_peaked() {
        let kernel = gaussian_kernel(2.0);
        let n = kernel.len();
        for i in 0..n / 2 {
            assert!((kernel[i] - kernel[n - 1 - i]).abs() < 1e-7);
            assert!(kernel[i] < kernel[i + 1]);
        }
    }

    #[test]
    fn test_zero_radius_is_identity() {
        assert_eq!(gaussian_kernel(0.0), vec![1.0]);
        let data = vec![0.1, 0.5, 0.9, 0.3];
        assert_eq!(blur_plane(&data, 4, 1, 1, 0.0), data);
    }

    #[test]
    fn test_flat_image_unchanged() {
        // Edge replication keeps a constant image constant, borders included
        let data = vec![0.4f32; 9 * 5 * 3];
        let out = blur_plane(&data, 9, 5, 3, 2.0);
        for v in out {
            assert!((v - 0.4).abs() < 1e-5);
        }
    }

    #[test]
    fn test_edge_replicate_not_zero_pad() {
        // A zero-padded blur would darken the border of a bright image
        let data = vec![1.0f32; 4 * 4];
        let out = blur_plane(&data, 4, 4, 1, 3.0);
        assert!((out[0] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_impulse_spreads() {
        let mut data = vec![0.0f32; 7 * 7];
        data[3 * 7 + 3] = 1.0;
        let out = blur_plane(&data, 7, 7, 1, 1.0);
        assert!(out[3 * 7 + 3] < 1.0);
        assert!(out[3 * 7 + 4] > 0.0);
        assert!(out[4 * 7 + 3] > 0.0);
        // Horizontal and vertical spread match
        assert!((out[3 * 7 + 4] - out[4 * 7 + 3]).abs() < 1e-6);
        let total: f32 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_bitmap_blur_keeps_alpha() {
        let mut pixels = vec![0u8; 5 * 5 * 4];
        for (i, px) in pixels.chunks_exact_mut(4).enumerate() {
            px[0] = if i % 2 == 0 { 255 } else { 0 };
            px[3] = i as u8 * 10;
        }
        let bmp = Bitmap::new(5, 5, pixels).unwrap();
        let out = gaussian_blur(&bmp, 1.5).unwrap();
        for (a, b) in out.pixels().chunks_exact(4).zip(bmp.pixels().chunks_exact(4)) {
            assert_eq!(a[3], b[3]);
        }
        // Checkerboard smooths toward gray
        let center = out.pixel(2, 2)[0];
        assert!(center > 0 && center < 255);
    }

    #[test]
    fn test_bitmap_blur_rejects_bad_radius() {
        let bmp = Bitmap::filled(2, 2, [0, 0, 0, 255]).unwrap();
        assert!(gaussian_blur(&bmp, -1.0).is_err());
        assert!(gaussian_blur(&bmp, f32::NAN).is_err());
        assert_eq!(gaussian_blur(&bmp, 0.0).unwrap(), bmp);
    }

    #[test]
    fn test_huge_radius_is_bounded() {
        let bmp = Bitmap::filled(2, 2, [0, 0, 0, 255]).unwrap();
        assert!(matches!(
            gaussian_blur(&bmp, 1e20),
            Err(Error::InvalidParameter(_))
        ));
        assert!(gaussian_blur(&bmp, f32::INFINITY).is_err());
        assert!(gaussian_blur(&bmp, MAX_BLUR_RADIUS).is_ok());

        // The kernel itself never grows past the maximum radius
        let max_taps = gaussian_kernel(MAX_BLUR_RADIUS).len();
        assert_eq!(max_taps, 1501);
        assert_eq!(gaussian_kernel(1e20).len(), max_taps);
        assert_eq!(gaussian_kernel(f32::INFINITY).len(), max_taps);
    }
}
