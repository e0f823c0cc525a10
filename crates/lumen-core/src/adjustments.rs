//! Per-pixel tonal and color operators.
//!
//! Every operator works on a normalized RGB triple and returns a new triple.
//! Values are not clamped between operators; clamping happens once, when the
//! pipeline writes the output bitmap. Each operator returns its input
//! untouched when its governing parameter is neutral.
//!
//! ## Pipeline order
//! 1. Temperature
//! 2. Tint
//! 3. Exposure
//! 4. Contrast
//! 5. Highlights
//! 6. Shadows
//! 7. Whites
//! 8. Blacks
//! 9. Curves (see [`crate::curve`])
//! 10. HSL bands (see [`crate::hsl`])
//! 11. Vibrance
//! 12. Saturation
//! 13. Split toning
//! 14. Dehaze
//!
//! Vignette and grain follow; they live in [`crate::effects`].

use std::f32::consts::FRAC_PI_4;

use crate::color::{clamp, hsl_to_rgb, kelvin_to_rgb, rgb_to_hsl, KELVIN_NEUTRAL};
use crate::luminance::luminance;
use crate::settings::SplitToningSettings;

/// Fixed contrast pivot: byte 128 maps to itself for every contrast amount.
pub const CONTRAST_PIVOT: f32 = 128.0 / 255.0;

// ============================================================================
// Exposure and Contrast
// ============================================================================

/// Apply exposure in stops.
///
/// Each channel is multiplied by `2^exposure`. Values pushed above 1.0 have
/// their excess compressed by the shoulder `1 + (1 - e^(1 - x))` so highlights
/// roll off instead of clipping hard.
#[inline]
pub fn apply_exposure(r: f32, g: f32, b: f32, exposure: f32) -> (f32, f32, f32) {
    if exposure == 0.0 {
        return (r, g, b);
    }
    let multiplier = 2.0_f32.powf(exposure);
    (
        shoulder(r * multiplier),
        shoulder(g * multiplier),
        shoulder(b * multiplier),
    )
}

#[inline]
fn shoulder(x: f32) -> f32 {
    if x > 1.0 {
        1.0 + (1.0 - (1.0 - x).exp())
    } else {
        x
    }
}

/// Apply contrast (-100 to 100).
///
/// The amount is mapped to a slope via `tan`, then each channel is scaled
/// around [`CONTRAST_PIVOT`].
#[inline]
pub fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 0.0 {
        return (r, g, b);
    }
    let steepness = (FRAC_PI_4 + (contrast / 100.0) * 0.9 * FRAC_PI_4).tan();
    let apply = |c: f32| (c - CONTRAST_PIVOT) * steepness + CONTRAST_PIVOT;
    (apply(r), apply(g), apply(b))
}

// ============================================================================
// Luminance-Masked Tonal Range
// ============================================================================

/// Triangular luminance window: 1 at `center`, falling to 0 at `center ± width`.
#[inline]
pub fn tonal_mask(luminance: f32, center: f32, width: f32) -> f32 {
    (1.0 - (luminance - center).abs() / width).max(0.0)
}

/// Apply highlights (-100 to 100) as a gain on the upper midtones.
#[inline]
pub fn apply_highlights(r: f32, g: f32, b: f32, highlights: f32) -> (f32, f32, f32) {
    if highlights == 0.0 {
        return (r, g, b);
    }
    let mask = tonal_mask(luminance(r, g, b), 0.85, 0.3);
    let gain = 1.0 + mask * (highlights / 100.0) * 0.5;
    (r * gain, g * gain, b * gain)
}

/// Apply shadows (-100 to 100) as an offset on the lower midtones.
#[inline]
pub fn apply_shadows(r: f32, g: f32, b: f32, shadows: f32) -> (f32, f32, f32) {
    if shadows == 0.0 {
        return (r, g, b);
    }
    let mask = tonal_mask(luminance(r, g, b), 0.15, 0.3);
    let offset = mask * (shadows / 100.0) * 0.5;
    (r + offset, g + offset, b + offset)
}

/// Apply whites (-100 to 100) as a gain on the brightest tones.
#[inline]
pub fn apply_whites(r: f32, g: f32, b: f32, whites: f32) -> (f32, f32, f32) {
    if whites == 0.0 {
        return (r, g, b);
    }
    let mask = tonal_mask(luminance(r, g, b), 0.95, 0.15);
    let gain = 1.0 + mask * (whites / 100.0) * 0.3;
    (r * gain, g * gain, b * gain)
}

/// Apply blacks (-100 to 100) as an offset on the darkest tones.
#[inline]
pub fn apply_blacks(r: f32, g: f32, b: f32, blacks: f32) -> (f32, f32, f32) {
    if blacks == 0.0 {
        return (r, g, b);
    }
    let mask = tonal_mask(luminance(r, g, b), 0.05, 0.15);
    let offset = mask * (blacks / 100.0) * 0.2;
    (r + offset, g + offset, b + offset)
}

// ============================================================================
// White Balance
// ============================================================================

/// Per-channel white balance gains for a target temperature.
///
/// The gain is the ratio between the 6500K reference white and the blackbody
/// color at `kelvin`, divided by its mean so overall brightness is kept.
/// Degenerate ratios fall back to a gain of 1.
pub fn temperature_multipliers(kelvin: f32) -> [f32; 3] {
    if kelvin == KELVIN_NEUTRAL {
        return [1.0; 3];
    }
    let (rr, rg, rb) = kelvin_to_rgb(KELVIN_NEUTRAL);
    let (tr, tg, tb) = kelvin_to_rgb(kelvin);

    let ratio = |reference: f32, target: f32| {
        if target > f32::EPSILON {
            reference / target
        } else {
            1.0
        }
    };
    let ratios = [ratio(rr, tr), ratio(rg, tg), ratio(rb, tb)];
    let mean = (ratios[0] + ratios[1] + ratios[2]) / 3.0;

    if !mean.is_finite() || mean <= f32::EPSILON {
        return [1.0; 3];
    }
    ratios.map(|r| r / mean)
}

/// Multiply by precomputed [`temperature_multipliers`].
#[inline]
pub fn apply_temperature(r: f32, g: f32, b: f32, multipliers: [f32; 3]) -> (f32, f32, f32) {
    (r * multipliers[0], g * multipliers[1], b * multipliers[2])
}

/// Apply tint (-100 to 100). Positive is magenta, negative is green.
///
/// Only the green channel is touched.
#[inline]
pub fn apply_tint(r: f32, g: f32, b: f32, tint: f32) -> (f32, f32, f32) {
    if tint == 0.0 {
        return (r, g, b);
    }
    (r, g * (1.0 - (tint / 100.0) * 0.2), b)
}

// ============================================================================
// Saturation and Vibrance
// ============================================================================

/// Hues treated as skin tones: 0-50 and 320-360 degrees.
#[inline]
pub fn is_skin_hue(hue: f32) -> bool {
    (0.0..=50.0).contains(&hue) || (320.0..=360.0).contains(&hue)
}

/// Apply saturation (-100 to 100). -100 fully desaturates.
#[inline]
pub fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 0.0 {
        return (r, g, b);
    }
    let (h, s, l) = rgb_to_hsl(r, g, b);
    hsl_to_rgb(h, s * (1.0 + saturation / 100.0), l)
}

/// Apply vibrance (-100 to 100).
///
/// The boost shrinks as saturation grows and is halved for skin hues.
#[inline]
pub fn apply_vibrance(r: f32, g: f32, b: f32, vibrance: f32) -> (f32, f32, f32) {
    if vibrance == 0.0 {
        return (r, g, b);
    }
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let mut boost = (vibrance / 100.0) * (1.0 - s);
    if is_skin_hue(h) {
        boost *= 0.5;
    }
    hsl_to_rgb(h, s * (1.0 + boost), l)
}

// ============================================================================
// Split Toning and Dehaze
// ============================================================================

/// Tint highlights and shadows toward their configured hues.
///
/// The highlight weight is a linear ramp of luminance around a midpoint moved
/// by `balance`; the shadow weight is its complement.
pub fn apply_split_toning(
    r: f32,
    g: f32,
    b: f32,
    settings: &SplitToningSettings,
) -> (f32, f32, f32) {
    if settings.is_neutral() {
        return (r, g, b);
    }
    let lum = clamp(luminance(r, g, b), 0.0, 1.0);
    let midpoint = 0.5 - settings.balance / 200.0;
    let highlight_weight = clamp(lum - midpoint + 0.5, 0.0, 1.0);
    let shadow_weight = 1.0 - highlight_weight;

    let mut out = (r, g, b);
    out = tone_toward(
        out,
        lum,
        settings.highlight_hue,
        settings.highlight_saturation,
        highlight_weight,
    );
    out = tone_toward(
        out,
        lum,
        settings.shadow_hue,
        settings.shadow_saturation,
        shadow_weight,
    );
    out
}

#[inline]
fn tone_toward(
    (r, g, b): (f32, f32, f32),
    lum: f32,
    hue: f32,
    saturation: f32,
    weight: f32,
) -> (f32, f32, f32) {
    if saturation == 0.0 || weight == 0.0 {
        return (r, g, b);
    }
    let (tr, tg, tb) = hsl_to_rgb(hue, (saturation / 100.0 + 0.2).min(1.0), lum);
    let f = (saturation / 100.0) * weight * 0.3;
    (r + (tr - r) * f, g + (tg - g) * f, b + (tb - b) * f)
}

/// Apply dehaze (-100 to 100).
///
/// Positive values stretch lightness around 0.5 and add saturation. Negative
/// values flatten both and lift brightness.
#[inline]
pub fn apply_dehaze(r: f32, g: f32, b: f32, dehaze: f32) -> (f32, f32, f32) {
    if dehaze == 0.0 {
        return (r, g, b);
    }
    let amount = dehaze / 100.0;
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let mut l = 0.5 + (l - 0.5) * (1.0 + amount * 0.5);
    if amount < 0.0 {
        l += amount.abs() * 0.1;
    }
    hsl_to_rgb(h, s * (1.0 + amount * 0.3), l)
}
