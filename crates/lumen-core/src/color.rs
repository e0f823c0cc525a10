//! Colorspace utilities: HSL, blackbody temperature, domain conversion.
//!
//! All functions are pure. Hue is expressed in degrees `[0, 360)`,
//! saturation and lightness in `[0, 1]`.

/// Clamp `x` into `[lo, hi]`. NaN maps to `lo`.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x.is_nan() {
        return lo;
    }
    x.max(lo).min(hi)
}

/// Convert a byte triple to the normalized domain (exact: divide by 255).
#[inline]
pub fn normalize(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Convert a single normalized channel to a byte (round, clamp to 0-255).
#[inline]
pub fn denormalize_channel(v: f32) -> u8 {
    (clamp(v, 0.0, 1.0) * 255.0).round() as u8
}

/// Convert a normalized triple to bytes (rounded and clamped).
#[inline]
pub fn denormalize(r: f32, g: f32, b: f32) -> (u8, u8, u8) {
    (
        denormalize_channel(r),
        denormalize_channel(g),
        denormalize_channel(b),
    )
}

/// Convert normalized RGB to HSL.
///
/// Inputs are clamped to `[0, 1]`. Achromatic inputs (r = g = b) return hue 0
/// and saturation 0.
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let r = clamp(r, 0.0, 1.0);
    let g = clamp(g, 0.0, 1.0);
    let b = clamp(b, 0.0, 1.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta <= f32::EPSILON {
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let h = (h * 60.0).rem_euclid(360.0);
    (h, clamp(s, 0.0, 1.0), l)
}

/// Convert HSL back to normalized RGB. Exact inverse of [`rgb_to_hsl`].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let s = clamp(s, 0.0, 1.0);
    let l = clamp(l, 0.0, 1.0);

    if s <= f32::EPSILON {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

#[inline]
fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Lowest supported color temperature in Kelvin.
pub const KELVIN_MIN: f32 = 2000.0;

/// Highest supported color temperature in Kelvin.
pub const KELVIN_MAX: f32 = 50000.0;

/// Daylight reference temperature (neutral white balance).
pub const KELVIN_NEUTRAL: f32 = 6500.0;

/// Approximate the color of a blackbody radiator as normalized RGB.
///
/// Uses the Tanner Helland curve fit. Input is clamped to
/// `[KELVIN_MIN, KELVIN_MAX]`; every output channel is finite and in `[0, 1]`.
pub fn kelvin_to_rgb(kelvin: f32) -> (f32, f32, f32) {
    let temp = clamp(kelvin, KELVIN_MIN, KELVIN_MAX) / 100.0;

    let r = if temp <= 66.0 {
        255.0
    } else {
        329.698_73 * (temp - 60.0).powf(-0.133_204_76)
    };

    let g = if temp <= 66.0 {
        99.470_8 * temp.ln() - 161.119_57
    } else {
        288.122_17 * (temp - 60.0).powf(-0.075_514_85)
    };

    let b = if temp >= 66.0 {
        255.0
    } else if temp <= 19.0 {
        0.0
    } else {
        138.517_73 * (temp - 10.0).ln() - 305.044_8
    };

    (
        clamp(r / 255.0, 0.0, 1.0),
        clamp(g / 255.0, 0.0, 1.0),
        clamp(b / 255.0, 0.0, 1.0),
    )
}
