//! Arbitrary-angle rotation with bilinear interpolation.
//!
//! The rotation uses inverse mapping: for each output pixel center we find
//! the source position and interpolate there. Output pixels whose source
//! position falls outside the image become fully transparent.
//!
//! For rotation by angle θ (counter-clockwise on screen, y pointing down),
//! the inverse transform around the two centers is:
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! Exact multiples of 90 degrees are handled by index remapping instead.

use tracing::debug;

use crate::bitmap::{Bitmap, CHANNELS};
use crate::filter::sample_bilinear;
use crate::rows::for_each_row;

/// Tolerance applied before rounding bounds up, so exact right angles do
/// not gain a pixel from floating-point noise.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Number of counter-clockwise quarter turns if `angle_degrees` is an exact
/// multiple of 90 degrees.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let turns = angle_degrees / 90.0;
    if (turns - turns.round()).abs() < 1e-9 {
        Some((turns.round() as i64).rem_euclid(4) as u32)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// `ceil(w|cos| + h|sin|)` by `ceil(w|sin| + h|cos|)`, at least 1x1.
/// Quarter turns keep or swap the dimensions exactly.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return if turns % 2 == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();
    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin - BOUNDS_EPSILON).ceil() as u32;
    let new_h = (w * sin + h * cos - BOUNDS_EPSILON).ceil() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate a bitmap about its center. Returns a new bitmap sized to the
/// rotated bounding box.
///
/// Positive angles rotate counter-clockwise.
pub fn apply_rotation(bitmap: &Bitmap, angle_degrees: f64) -> Bitmap {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return rotate_quarter_turns(bitmap, turns);
    }

    let (src_w, src_h) = (bitmap.width() as usize, bitmap.height() as usize);
    let (dst_w, dst_h) = compute_rotated_bounds(bitmap.width(), bitmap.height(), angle_degrees);
    debug!(
        src_w,
        src_h, dst_w, dst_h, angle_degrees, "Rotating bitmap"
    );

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w as f64 / 2.0;
    let src_cy = src_h as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let src = bitmap.pixels();
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * CHANNELS];

    for_each_row(&mut output, dst_w as usize * CHANNELS, |dst_y, row| {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for (dst_x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            // Continuous source position, shifted so pixel centers are integers
            let sx = dx * cos - dy * sin + src_cx - 0.5;
            let sy = dx * sin + dy * cos + src_cy - 0.5;

            let sample = sample_bilinear::<u8, CHANNELS>(src, src_w, src_h, sx as f32, sy as f32);
            for (out, v) in px.iter_mut().zip(sample) {
                *out = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    Bitmap::from_parts(dst_w, dst_h, output)
}

/// Exact rotation by `turns` counter-clockwise quarter turns.
fn rotate_quarter_turns(bitmap: &Bitmap, turns: u32) -> Bitmap {
    let (w, h) = (bitmap.width(), bitmap.height());
    if turns == 0 {
        return bitmap.clone();
    }
    debug!(width = w, height = h, turns, "Rotating bitmap by quarter turns");

    let (dst_w, dst_h) = if turns % 2 == 0 { (w, h) } else { (h, w) };
    let mut output = vec![0u8; bitmap.pixels().len()];

    for_each_row(&mut output, dst_w as usize * CHANNELS, |y, row| {
        let y = y as u32;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let x = x as u32;
            let (sx, sy) = match turns {
                1 => (w - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (y, h - 1 - x),
            };
            px.copy_from_slice(&bitmap.pixel(sx, sy));
        }
    });

    Bitmap::from_parts(dst_w, dst_h, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel encodes its position: (x, y, 0, 255).
    fn test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height) as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Bitmap::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_no_rotation() {
        let img = test_image(10, 8);
        assert_eq!(apply_rotation(&img, 0.0), img);
        assert_eq!(apply_rotation(&img, 360.0), img);
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 720.0), (100, 50));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        // 100 * (cos 45 + sin 45) = 141.42, rounded up
        assert_eq!(compute_rotated_bounds(100, 100, 45.0), (142, 142));
    }

    #[test]
    fn test_negative_rotation_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 50, 30.0),
            compute_rotated_bounds(100, 50, -30.0)
        );
    }

    #[test]
    fn test_quarter_turn_counter_clockwise() {
        let img = test_image(3, 2);
        let out = apply_rotation(&img, 90.0);
        assert_eq!((out.width(), out.height()), (2, 3));
        // Top-right source pixel lands top-left
        assert_eq!(out.pixel(0, 0), img.pixel(2, 0));
        // Bottom-left source pixel lands bottom-right
        assert_eq!(out.pixel(1, 2), img.pixel(0, 1));
    }

    #[test]
    fn test_half_turn() {
        let img = test_image(3, 2);
        let out = apply_rotation(&img, 180.0);
        assert_eq!(out.pixel(0, 0), img.pixel(2, 1));
        assert_eq!(out.pixel(2, 1), img.pixel(0, 0));
    }

    #[test]
    fn test_quarter_turns_compose() {
        let img = test_image(5, 3);
        let once = apply_rotation(&img, 90.0);
        let back = apply_rotation(&once, -90.0);
        assert_eq!(back, img);
        let four = (0..4).fold(img.clone(), |acc, _| apply_rotation(&acc, 90.0));
        assert_eq!(four, img);
    }

    #[test]
    fn test_corners_become_transparent() {
        let img = Bitmap::filled(40, 40, [200, 100, 50, 255]).unwrap();
        let out = apply_rotation(&img, 45.0);
        assert_eq!(out.pixel(0, 0)[3], 0);
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        assert_eq!(out.pixel(cx, cy), [200, 100, 50, 255]);
    }

    #[test]
    fn test_small_angle_keeps_center() {
        let img = test_image(21, 21);
        let out = apply_rotation(&img, 1.0);
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        let px = out.pixel(cx, cy);
        assert!((px[0] as i32 - 10).abs() <= 1);
        assert!((px[1] as i32 - 10).abs() <= 1);
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = Bitmap::filled(1, 1, [9, 9, 9, 255]).unwrap();
        let out = apply_rotation(&img, 33.0);
        assert!(out.width() >= 1 && out.height() >= 1);
    }
}
