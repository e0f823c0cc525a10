//! Per-band hue, saturation and luminance adjustment.
//!
//! Each of the eight bands has a center hue and a half-width. A pixel's
//! membership in a band is `cos(distance / half_width * π/2)` inside the band
//! and 0 outside. Bands overlap at their edges, so a pixel can collect shifts
//! from two neighbors at once. Contributions are summed without dividing by
//! the total weight; two strongly overlapping bands can therefore shift hue by
//! more than a single band's 60 degree maximum.

use std::f32::consts::FRAC_PI_2;

use crate::adjustments::is_skin_hue;
use crate::color::{hsl_to_rgb, rgb_to_hsl};
use crate::settings::HslSettings;

/// Largest hue shift a single band applies, in degrees.
pub const MAX_HUE_SHIFT: f32 = 60.0;

/// Pixels below this saturation have no meaningful hue and are skipped.
const ACHROMATIC_SATURATION: f32 = 1e-4;

/// Extra damping applied to band weights for unsaturated skin tones.
const SKIN_DAMPING: f32 = 0.3;

/// The eight named hue bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HueBand {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HueBand {
    pub const ALL: [HueBand; 8] = [
        HueBand::Red,
        HueBand::Orange,
        HueBand::Yellow,
        HueBand::Green,
        HueBand::Aqua,
        HueBand::Blue,
        HueBand::Purple,
        HueBand::Magenta,
    ];

    /// Center hue in degrees.
    pub fn center(self) -> f32 {
        match self {
            HueBand::Red => 0.0,
            HueBand::Orange => 30.0,
            HueBand::Yellow => 60.0,
            HueBand::Green => 120.0,
            HueBand::Aqua => 180.0,
            HueBand::Blue => 240.0,
            HueBand::Purple => 270.0,
            HueBand::Magenta => 300.0,
        }
    }

    /// Distance from the center at which membership reaches zero.
    pub fn half_width(self) -> f32 {
        match self {
            HueBand::Red | HueBand::Orange | HueBand::Yellow => 30.0,
            HueBand::Green | HueBand::Aqua | HueBand::Blue => 60.0,
            HueBand::Purple | HueBand::Magenta => 30.0,
        }
    }

    /// Membership weight of `hue` in this band, in `[0, 1]`.
    pub fn weight(self, hue: f32) -> f32 {
        let d = hue_distance(hue, self.center());
        let width = self.half_width();
        if d >= width {
            0.0
        } else {
            (d / width * FRAC_PI_2).cos()
        }
    }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
#[inline]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Apply all band adjustments to one normalized pixel.
pub fn apply_hsl_bands(r: f32, g: f32, b: f32, settings: &HslSettings) -> (f32, f32, f32) {
    if settings.is_neutral() {
        return (r, g, b);
    }

    let (h, s, l) = rgb_to_hsl(r, g, b);
    if s < ACHROMATIC_SATURATION {
        return (r, g, b);
    }

    let damping = if is_skin_hue(h) && s < 0.6 {
        SKIN_DAMPING
    } else {
        1.0
    };

    let mut total_weight = 0.0;
    let mut hue_shift = 0.0;
    let mut sat_shift = 0.0;
    let mut lum_shift = 0.0;

    for band in HueBand::ALL {
        let adj = settings.band(band);
        if adj.is_neutral() {
            continue;
        }
        let w = band.weight(h) * damping;
        if w == 0.0 {
            continue;
        }
        total_weight += w;
        hue_shift += adj.hue / 100.0 * MAX_HUE_SHIFT * w;
        sat_shift += adj.saturation / 100.0 * w;
        lum_shift += adj.luminance / 100.0 * w;
    }

    if total_weight == 0.0 {
        return (r, g, b);
    }

    hsl_to_rgb(h + hue_shift, s * (1.0 + sat_shift), l + lum_shift * 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{denormalize, normalize};
    use crate::settings::HslBand;

    fn bands_with(band: HueBand, adj: HslBand) -> HslSettings {
        let mut settings = HslSettings::default();
        *settings.band_mut(band) = adj;
        settings
    }

    #[test]
    fn test_weight_peaks_at_center() {
        for band in HueBand::ALL {
            assert!((band.weight(band.center()) - 1.0).abs() < 1e-6);
            assert_eq!(band.weight(band.center() + band.half_width()), 0.0);
        }
    }

    #[test]
    fn test_weight_wraps_around_zero() {
        let w_low = HueBand::Red.weight(10.0);
        let w_high = HueBand::Red.weight(350.0);
        assert!((w_low - w_high).abs() < 1e-5);
        assert!(w_low > 0.0);
    }

    #[test]
    fn test_hue_distance() {
        assert_eq!(hue_distance(10.0, 350.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
        assert_eq!(hue_distance(120.0, 120.0), 0.0);
    }

    #[test]
    fn test_neutral_is_identity() {
        let (r, g, b) = normalize(210, 90, 30);
        assert_eq!(apply_hsl_bands(r, g, b, &HslSettings::default()), (r, g, b));
    }

    #[test]
    fn test_band_isolation() {
        let settings = bands_with(
            HueBand::Green,
            HslBand {
                hue: 50.0,
                saturation: -40.0,
                luminance: 30.0,
            },
        );

        // Pure red has zero green membership
        let (r, g, b) = normalize(255, 0, 0);
        assert_eq!(apply_hsl_bands(r, g, b, &settings), (r, g, b));

        // Pure green gets the full shift
        let (r, g, b) = normalize(0, 255, 0);
        let out = apply_hsl_bands(r, g, b, &settings);
        let (h, s, l) = rgb_to_hsl(out.0, out.1, out.2);
        assert!((h - 150.0).abs() < 0.01, "hue {}", h);
        assert!((s - 0.6).abs() < 1e-3, "sat {}", s);
        assert!((l - 0.575).abs() < 1e-3, "lum {}", l);
    }

    #[test]
    fn test_achromatic_skipped() {
        let settings = bands_with(
            HueBand::Red,
            HslBand {
                hue: 100.0,
                saturation: 100.0,
                luminance: 100.0,
            },
        );
        let (r, g, b) = normalize(90, 90, 90);
        assert_eq!(apply_hsl_bands(r, g, b, &settings), (r, g, b));
    }

    #[test]
    fn test_skin_damping() {
        let settings = bands_with(
            HueBand::Orange,
            HslBand {
                hue: 0.0,
                saturation: 100.0,
                luminance: 0.0,
            },
        );
        // Low-saturation skin tone at the orange center: weight 0.3
        let (r, g, b) = hsl_to_rgb(30.0, 0.4, 0.5);
        let out = apply_hsl_bands(r, g, b, &settings);
        let (_, s, _) = rgb_to_hsl(out.0, out.1, out.2);
        assert!((s - 0.4 * 1.3).abs() < 1e-3, "sat {}", s);

        // Same hue with high saturation is not damped
        let (r, g, b) = hsl_to_rgb(30.0, 0.7, 0.5);
        let out = apply_hsl_bands(r, g, b, &settings);
        let (_, s, _) = rgb_to_hsl(out.0, out.1, out.2);
        assert!((s - 1.0).abs() < 1e-3, "sat {}", s);
    }

    #[test]
    fn test_overlapping_bands_accumulate_past_single_band_max() {
        // Hue 15 sits halfway between red and orange, each weight cos(π/4)
        let mut settings = HslSettings::default();
        settings.red.hue = 100.0;
        settings.orange.hue = 100.0;

        let (r, g, b) = hsl_to_rgb(15.0, 0.9, 0.5);
        let out = apply_hsl_bands(r, g, b, &settings);
        let (h, _, _) = rgb_to_hsl(out.0, out.1, out.2);

        // 2 * 60 * 0.7071 = 84.85 degrees, more than one band can give
        let shift = h - 15.0;
        assert!(shift > MAX_HUE_SHIFT, "shift {}", shift);
        assert!((shift - 84.85).abs() < 0.1, "shift {}", shift);
    }

    #[test]
    fn test_negative_luminance_darkens() {
        let settings = bands_with(
            HueBand::Blue,
            HslBand {
                hue: 0.0,
                saturation: 0.0,
                luminance: -100.0,
            },
        );
        let (r, g, b) = normalize(0, 0, 255);
        let (r2, g2, b2) = apply_hsl_bands(r, g, b, &settings);
        // l drops from 0.5 to 0.25
        assert!((b2 - 0.5).abs() < 1e-5);
        assert_eq!(denormalize(r2, g2, 0.0), (0, 0, 0));
    }
}
