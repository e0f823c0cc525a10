//! Adjustment settings passed to the pipeline on every call.
//!
//! [`AdjustmentSettings`] is a plain value grouped into one sub-struct per
//! category. The core never mutates it; callers build a new value for each
//! edit. Every numeric field has a neutral default, and an operator whose
//! governing parameters are neutral is an exact no-op.
//!
//! All structs deserialize from partial camelCase objects: missing fields take
//! their neutral defaults.

use serde::{Deserialize, Serialize};

use crate::color::{KELVIN_MAX, KELVIN_MIN, KELVIN_NEUTRAL};
use crate::curve::ToneCurve;
use crate::hsl::HueBand;

/// Clamp a slider value, mapping non-finite input to the neutral value.
#[inline]
fn clamp_or(value: f32, lo: f32, hi: f32, neutral: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        neutral
    }
}

/// Exposure and tonal range adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicSettings {
    /// Exposure in stops (-5 to 5)
    pub exposure: f32,
    /// Contrast (-100 to 100)
    pub contrast: f32,
    /// Highlights (-100 to 100)
    pub highlights: f32,
    /// Shadows (-100 to 100)
    pub shadows: f32,
    /// Whites (-100 to 100)
    pub whites: f32,
    /// Blacks (-100 to 100)
    pub blacks: f32,
}

impl BasicSettings {
    /// Check if all values are at their defaults
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    fn clamped(&self) -> Self {
        Self {
            exposure: clamp_or(self.exposure, -5.0, 5.0, 0.0),
            contrast: clamp_or(self.contrast, -100.0, 100.0, 0.0),
            highlights: clamp_or(self.highlights, -100.0, 100.0, 0.0),
            shadows: clamp_or(self.shadows, -100.0, 100.0, 0.0),
            whites: clamp_or(self.whites, -100.0, 100.0, 0.0),
            blacks: clamp_or(self.blacks, -100.0, 100.0, 0.0),
        }
    }
}

/// White balance and global color intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorSettings {
    /// White balance temperature in Kelvin (2000 to 50000, neutral 6500)
    pub temperature: f32,
    /// Green-magenta tint (-100 to 100)
    pub tint: f32,
    /// Saturation (-100 to 100)
    pub saturation: f32,
    /// Vibrance (-100 to 100)
    pub vibrance: f32,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            temperature: KELVIN_NEUTRAL,
            tint: 0.0,
            saturation: 0.0,
            vibrance: 0.0,
        }
    }
}

impl ColorSettings {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    fn clamped(&self) -> Self {
        Self {
            temperature: clamp_or(self.temperature, KELVIN_MIN, KELVIN_MAX, KELVIN_NEUTRAL),
            tint: clamp_or(self.tint, -100.0, 100.0, 0.0),
            saturation: clamp_or(self.saturation, -100.0, 100.0, 0.0),
            vibrance: clamp_or(self.vibrance, -100.0, 100.0, 0.0),
        }
    }
}

/// Hue, saturation and luminance shift for one hue band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HslBand {
    /// Hue shift (-100 to 100, maps to at most 60 degrees)
    pub hue: f32,
    /// Saturation shift (-100 to 100)
    pub saturation: f32,
    /// Luminance shift (-100 to 100)
    pub luminance: f32,
}

impl HslBand {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    fn clamped(&self) -> Self {
        Self {
            hue: clamp_or(self.hue, -100.0, 100.0, 0.0),
            saturation: clamp_or(self.saturation, -100.0, 100.0, 0.0),
            luminance: clamp_or(self.luminance, -100.0, 100.0, 0.0),
        }
    }
}

/// Per-band HSL adjustments for the eight named hue bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HslSettings {
    pub red: HslBand,
    pub orange: HslBand,
    pub yellow: HslBand,
    pub green: HslBand,
    pub aqua: HslBand,
    pub blue: HslBand,
    pub purple: HslBand,
    pub magenta: HslBand,
}

impl HslSettings {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Settings for a single band.
    pub fn band(&self, band: HueBand) -> &HslBand {
        match band {
            HueBand::Red => &self.red,
            HueBand::Orange => &self.orange,
            HueBand::Yellow => &self.yellow,
            HueBand::Green => &self.green,
            HueBand::Aqua => &self.aqua,
            HueBand::Blue => &self.blue,
            HueBand::Purple => &self.purple,
            HueBand::Magenta => &self.magenta,
        }
    }

    /// Mutable access to a single band.
    pub fn band_mut(&mut self, band: HueBand) -> &mut HslBand {
        match band {
            HueBand::Red => &mut self.red,
            HueBand::Orange => &mut self.orange,
            HueBand::Yellow => &mut self.yellow,
            HueBand::Green => &mut self.green,
            HueBand::Aqua => &mut self.aqua,
            HueBand::Blue => &mut self.blue,
            HueBand::Purple => &mut self.purple,
            HueBand::Magenta => &mut self.magenta,
        }
    }

    fn clamped(&self) -> Self {
        let mut out = *self;
        for band in HueBand::ALL {
            *out.band_mut(band) = self.band(band).clamped();
        }
        out
    }
}

/// Channel curves. Channel curves run before the master curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurveSettings {
    /// Master curve applied to all three channels
    pub rgb: ToneCurve,
    pub red: ToneCurve,
    pub green: ToneCurve,
    pub blue: ToneCurve,
}

impl CurveSettings {
    pub fn is_neutral(&self) -> bool {
        self.rgb.is_identity()
            && self.red.is_identity()
            && self.green.is_identity()
            && self.blue.is_identity()
    }
}

/// Post-crop vignette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VignetteSettings {
    /// Positive darkens edges, negative brightens (-100 to 100)
    pub amount: f32,
    /// Distance from center where the falloff is centered (0 to 100)
    pub midpoint: f32,
    /// Negative values square the shape off (-100 to 100)
    pub roundness: f32,
    /// Width of the falloff transition (0 to 100)
    pub feather: f32,
    /// Highlight protection when darkening (0 to 100)
    pub highlights: f32,
}

impl Default for VignetteSettings {
    fn default() -> Self {
        Self {
            amount: 0.0,
            midpoint: 50.0,
            roundness: 0.0,
            feather: 50.0,
            highlights: 0.0,
        }
    }
}

impl VignetteSettings {
    /// The vignette is a no-op whenever amount is zero.
    pub fn is_neutral(&self) -> bool {
        self.amount == 0.0
    }

    fn clamped(&self) -> Self {
        Self {
            amount: clamp_or(self.amount, -100.0, 100.0, 0.0),
            midpoint: clamp_or(self.midpoint, 0.0, 100.0, 50.0),
            roundness: clamp_or(self.roundness, -100.0, 100.0, 0.0),
            feather: clamp_or(self.feather, 0.0, 100.0, 50.0),
            highlights: clamp_or(self.highlights, 0.0, 100.0, 0.0),
        }
    }
}

/// Film grain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrainSettings {
    /// Grain strength (0 to 100)
    pub amount: f32,
    /// Grain cell size (0 to 100)
    pub size: f32,
    /// Grain intensity variation (0 to 100)
    pub roughness: f32,
    /// Share one noise sample across channels
    pub monochrome: bool,
}

impl Default for GrainSettings {
    fn default() -> Self {
        Self {
            amount: 0.0,
            size: 25.0,
            roughness: 50.0,
            monochrome: false,
        }
    }
}

impl GrainSettings {
    /// Grain is a no-op whenever amount is zero.
    pub fn is_neutral(&self) -> bool {
        self.amount == 0.0
    }

    fn clamped(&self) -> Self {
        Self {
            amount: clamp_or(self.amount, 0.0, 100.0, 0.0),
            size: clamp_or(self.size, 0.0, 100.0, 25.0),
            roughness: clamp_or(self.roughness, 0.0, 100.0, 50.0),
            monochrome: self.monochrome,
        }
    }
}

/// Creative effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsSettings {
    pub vignette: VignetteSettings,
    pub grain: GrainSettings,
    /// Dehaze (-100 to 100)
    pub dehaze: f32,
}

impl EffectsSettings {
    pub fn is_neutral(&self) -> bool {
        self.vignette.is_neutral() && self.grain.is_neutral() && self.dehaze == 0.0
    }

    fn clamped(&self) -> Self {
        Self {
            vignette: self.vignette.clamped(),
            grain: self.grain.clamped(),
            dehaze: clamp_or(self.dehaze, -100.0, 100.0, 0.0),
        }
    }
}

/// Split toning of highlights and shadows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitToningSettings {
    /// Highlight tint hue in degrees (0 to 360)
    pub highlight_hue: f32,
    /// Highlight tint strength (0 to 100)
    pub highlight_saturation: f32,
    /// Shadow tint hue in degrees (0 to 360)
    pub shadow_hue: f32,
    /// Shadow tint strength (0 to 100)
    pub shadow_saturation: f32,
    /// Shifts the highlight/shadow split (-100 to 100)
    pub balance: f32,
}

impl SplitToningSettings {
    /// Split toning only acts when one of the tints has saturation.
    pub fn is_neutral(&self) -> bool {
        self.highlight_saturation == 0.0 && self.shadow_saturation == 0.0
    }

    fn clamped(&self) -> Self {
        Self {
            highlight_hue: clamp_or(self.highlight_hue, 0.0, 360.0, 0.0),
            highlight_saturation: clamp_or(self.highlight_saturation, 0.0, 100.0, 0.0),
            shadow_hue: clamp_or(self.shadow_hue, 0.0, 360.0, 0.0),
            shadow_saturation: clamp_or(self.shadow_saturation, 0.0, 100.0, 0.0),
            balance: clamp_or(self.balance, -100.0, 100.0, 0.0),
        }
    }
}

/// Lens distortion and chromatic aberration correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LensCorrectionSettings {
    /// Radial distortion (-100 to 100)
    pub distortion: f32,
    /// Red/cyan fringe correction (-100 to 100)
    pub ca_red_cyan: f32,
    /// Blue/yellow fringe correction (-100 to 100)
    pub ca_blue_yellow: f32,
}

impl LensCorrectionSettings {
    /// True when any term requires resampling the source.
    pub fn is_active(&self) -> bool {
        self.distortion != 0.0 || self.ca_red_cyan != 0.0 || self.ca_blue_yellow != 0.0
    }

    fn clamped(&self) -> Self {
        Self {
            distortion: clamp_or(self.distortion, -100.0, 100.0, 0.0),
            ca_red_cyan: clamp_or(self.ca_red_cyan, -100.0, 100.0, 0.0),
            ca_blue_yellow: clamp_or(self.ca_blue_yellow, -100.0, 100.0, 0.0),
        }
    }
}

fn default_sharpen_radius() -> f32 {
    1.0
}

/// Sharpening and local contrast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailSettings {
    /// Unsharp mask amount (0 to 150)
    pub sharpening: f32,
    /// Unsharp mask blur radius in pixels (0.5 to 3.0)
    #[serde(default = "default_sharpen_radius")]
    pub sharpen_radius: f32,
    /// Minimum local difference to sharpen, in byte units (0 to 255)
    pub sharpen_threshold: f32,
    /// Local contrast (-100 to 100)
    pub clarity: f32,
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self {
            sharpening: 0.0,
            sharpen_radius: default_sharpen_radius(),
            sharpen_threshold: 0.0,
            clarity: 0.0,
        }
    }
}

impl DetailSettings {
    pub fn is_neutral(&self) -> bool {
        self.sharpening == 0.0 && self.clarity == 0.0
    }

    fn clamped(&self) -> Self {
        Self {
            sharpening: clamp_or(self.sharpening, 0.0, 150.0, 0.0),
            sharpen_radius: clamp_or(self.sharpen_radius, 0.5, 3.0, 1.0),
            sharpen_threshold: clamp_or(self.sharpen_threshold, 0.0, 255.0, 0.0),
            clarity: clamp_or(self.clarity, -100.0, 100.0, 0.0),
        }
    }
}

/// Normalized crop rectangle (0.0 to 1.0 relative to the rotated image).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRect {
    fn default() -> Self {
        Self::FULL
    }
}

impl CropRect {
    /// The whole frame.
    pub const FULL: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers the whole frame.
    pub fn is_full(&self) -> bool {
        self.x <= 0.0 && self.y <= 0.0 && self.width >= 1.0 && self.height >= 1.0
    }
}

/// Geometric transforms, applied as rotate, then flips, then crop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformSettings {
    /// Rotation in degrees (positive = counter-clockwise)
    pub rotation: f64,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub crop: CropRect,
}

impl TransformSettings {
    pub fn is_neutral(&self) -> bool {
        self.rotation == 0.0 && !self.flip_horizontal && !self.flip_vertical && self.crop.is_full()
    }

    fn clamped(&self) -> Self {
        let unit = |v: f64, neutral: f64| {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                neutral
            }
        };
        Self {
            rotation: if self.rotation.is_finite() {
                self.rotation
            } else {
                0.0
            },
            flip_horizontal: self.flip_horizontal,
            flip_vertical: self.flip_vertical,
            crop: CropRect {
                x: unit(self.crop.x, 0.0),
                y: unit(self.crop.y, 0.0),
                width: unit(self.crop.width, 1.0),
                height: unit(self.crop.height, 1.0),
            },
        }
    }
}

/// Complete set of adjustments for one processing call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdjustmentSettings {
    pub basic: BasicSettings,
    pub color: ColorSettings,
    pub hsl: HslSettings,
    pub curves: CurveSettings,
    pub effects: EffectsSettings,
    pub split_toning: SplitToningSettings,
    pub lens: LensCorrectionSettings,
    pub detail: DetailSettings,
    pub transform: TransformSettings,
}

impl AdjustmentSettings {
    /// Create settings with every adjustment at its neutral value.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when processing with these settings returns the input unchanged.
    pub fn is_neutral(&self) -> bool {
        self.basic.is_neutral()
            && self.color.is_neutral()
            && self.hsl.is_neutral()
            && self.curves.is_neutral()
            && self.effects.is_neutral()
            && self.split_toning.is_neutral()
            && !self.lens.is_active()
            && self.detail.is_neutral()
            && self.transform.is_neutral()
    }

    /// Copy with every slider clamped into its documented range.
    ///
    /// Non-finite values fall back to the neutral value. Curves are left
    /// untouched; they are validated instead.
    pub fn clamped(&self) -> Self {
        Self {
            basic: self.basic.clamped(),
            color: self.color.clamped(),
            hsl: self.hsl.clamped(),
            curves: self.curves.clone(),
            effects: self.effects.clamped(),
            split_toning: self.split_toning.clamped(),
            lens: self.lens.clamped(),
            detail: self.detail.clamped(),
            transform: self.transform.clamped(),
        }
    }
}
