//! Luminance calculation using ITU-R BT.601 luma weights.
//!
//! Every luminance-driven step in the crate (tonal masks, split toning,
//! vignette highlight protection, histogram) uses these weights. This is
//! broadcast luma on gamma-encoded values, not linear-light luminance.

/// BT.601 weight for the red channel.
pub const LUMA_R: f32 = 0.299;

/// BT.601 weight for the green channel.
pub const LUMA_G: f32 = 0.587;

/// BT.601 weight for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Luma of a normalized RGB triple (0.0 to 1.0).
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Luma of a byte RGB triple, rounded to 0-255.
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extremes() {
        assert!((luminance(1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
        assert_eq!(luminance(0.0, 0.0, 0.0), 0.0);
        assert_eq!(luminance_u8(255, 255, 255), 255);
        assert_eq!(luminance_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_gray_preserves_value() {
        for v in [0u8, 1, 64, 128, 200, 255] {
            assert_eq!(luminance_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_primaries() {
        // 0.299 * 255 = 76.2, 0.587 * 255 = 149.7, 0.114 * 255 = 29.1
        assert_eq!(luminance_u8(255, 0, 0), 76);
        assert_eq!(luminance_u8(0, 255, 0), 150);
        assert_eq!(luminance_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_green_dominates() {
        assert!(luminance(0.0, 1.0, 0.0) > luminance(1.0, 0.0, 0.0));
        assert!(luminance(1.0, 0.0, 0.0) > luminance(0.0, 0.0, 1.0));
    }
}
