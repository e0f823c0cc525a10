//! The full-image processing pipeline.
//!
//! [`process`] is the single entry point used by an editor: it takes an
//! immutable source bitmap, a settings value and a grain seed, and returns a
//! new bitmap.
//!
//! ## Stages
//! 1. Geometric transforms (rotate, flip, crop)
//! 2. Lens correction remap, when distortion or chromatic aberration is set
//! 3. Gaussian blurs for clarity and sharpening, once per call
//! 4. One pass over every pixel:
//!    detail (clarity, sharpening), temperature, tint, exposure, contrast,
//!    highlights, shadows, whites, blacks, curves, HSL bands, vibrance,
//!    saturation, split toning, dehaze, vignette, grain
//!
//! Alpha is copied from the transformed source and never read by a color
//! operator.

use std::borrow::Cow;

use tracing::debug;

use crate::adjustments::{
    apply_blacks, apply_contrast, apply_dehaze, apply_exposure, apply_highlights,
    apply_saturation, apply_shadows, apply_split_toning, apply_temperature, apply_tint,
    apply_vibrance, apply_whites, temperature_multipliers,
};
use crate::bitmap::{Bitmap, CHANNELS};
use crate::color::{denormalize, KELVIN_NEUTRAL};
use crate::curve::CurveTables;
use crate::effects::{apply_grain, Grain, LensRemap, Vignette};
use crate::error::Result;
use crate::filter::{blur_plane, clarity_channel, unsharp_channel, CLARITY_RADIUS};
use crate::hsl::apply_hsl_bands;
use crate::luminance::luminance;
use crate::rows::for_each_row;
use crate::settings::{AdjustmentSettings, BasicSettings, HslSettings, SplitToningSettings};
use crate::transform::apply_transforms;

/// Process a bitmap with the given settings.
///
/// `seed` drives film grain; the same inputs and seed always produce the same
/// output. Out-of-range settings are clamped. With neutral settings the
/// output equals the input byte for byte.
///
/// # Errors
/// [`crate::Error::MalformedCurve`] if any curve fails validation.
pub fn process(source: &Bitmap, settings: &AdjustmentSettings, seed: u32) -> Result<Bitmap> {
    let settings = settings.clamped();
    let curves = CurveTables::new(&settings.curves)?;

    if settings.is_neutral() {
        debug!(
            width = source.width(),
            height = source.height(),
            "Neutral settings, returning copy"
        );
        return Ok(source.clone());
    }

    let transformed = if settings.transform.is_neutral() {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(apply_transforms(source, &settings.transform))
    };

    let width = transformed.width();
    let height = transformed.height();
    let lens = LensRemap::new(&settings.lens, width, height);
    let stage = PixelStage::new(&settings, curves, width, height, seed);

    debug!(
        src_width = source.width(),
        src_height = source.height(),
        width,
        height,
        lens_correction = lens.is_some(),
        clarity = settings.detail.clarity,
        sharpening = settings.detail.sharpening,
        seed,
        "Processing image"
    );

    if lens.is_none() && stage.is_identity() {
        return Ok(transformed.into_owned());
    }

    let mut rgb = transformed.to_normalized_rgb();
    if let Some(remap) = &lens {
        rgb = remap.remap_plane(&rgb);
    }

    let (w, h) = (width as usize, height as usize);
    let detail = &settings.detail;
    let clarity_blur = (detail.clarity != 0.0).then(|| blur_plane(&rgb, w, h, 3, CLARITY_RADIUS));
    let sharpen_blur =
        (detail.sharpening > 0.0).then(|| blur_plane(&rgb, w, h, 3, detail.sharpen_radius));
    let detail = Detail {
        clarity: detail.clarity / 100.0,
        clarity_blur: clarity_blur.as_deref(),
        sharpening: detail.sharpening / 100.0,
        threshold: detail.sharpen_threshold / 255.0,
        sharpen_blur: sharpen_blur.as_deref(),
    };

    let alpha_source = transformed.pixels();
    let mut output = vec![0u8; alpha_source.len()];

    for_each_row(&mut output, w * CHANNELS, |y, row| {
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let i = (y * w + x) * 3;
            let (r, g, b) = detail.apply(&rgb, i);
            let (r, g, b) = stage.apply(r, g, b, x as u32, y as u32);
            let (r, g, b) = denormalize(r, g, b);
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = alpha_source[(y * w + x) * CHANNELS + 3];
        }
    });

    Ok(Bitmap::from_parts(width, height, output))
}

/// Clarity and sharpening inputs for one call.
struct Detail<'a> {
    clarity: f32,
    clarity_blur: Option<&'a [f32]>,
    sharpening: f32,
    threshold: f32,
    sharpen_blur: Option<&'a [f32]>,
}

impl Detail<'_> {
    /// Detail-adjusted pixel starting at `rgb[i]`.
    #[inline]
    fn apply(&self, rgb: &[f32], i: usize) -> (f32, f32, f32) {
        let mut out = [rgb[i], rgb[i + 1], rgb[i + 2]];
        for (c, v) in out.iter_mut().enumerate() {
            let src = rgb[i + c];
            if let Some(blur) = self.clarity_blur {
                *v = clarity_channel(src, blur[i + c], self.clarity);
            }
            if let Some(blur) = self.sharpen_blur {
                *v += unsharp_channel(src, blur[i + c], self.sharpening, self.threshold) - src;
            }
        }
        (out[0], out[1], out[2])
    }
}

/// Everything the per-pixel operators need, resolved once per call.
struct PixelStage {
    basic: BasicSettings,
    temperature: Option<[f32; 3]>,
    tint: f32,
    curves: CurveTables,
    hsl: HslSettings,
    vibrance: f32,
    saturation: f32,
    split_toning: SplitToningSettings,
    dehaze: f32,
    vignette: Option<Vignette>,
    grain: Option<Grain>,
    detail: bool,
}

impl PixelStage {
    fn new(
        settings: &AdjustmentSettings,
        curves: CurveTables,
        width: u32,
        height: u32,
        seed: u32,
    ) -> Self {
        let kelvin = settings.color.temperature;
        Self {
            basic: settings.basic,
            temperature: (kelvin != KELVIN_NEUTRAL)
                .then(|| temperature_multipliers(kelvin)),
            tint: settings.color.tint,
            curves,
            hsl: settings.hsl,
            vibrance: settings.color.vibrance,
            saturation: settings.color.saturation,
            split_toning: settings.split_toning,
            dehaze: settings.effects.dehaze,
            vignette: Vignette::new(&settings.effects.vignette, width, height),
            grain: Grain::new(&settings.effects.grain, seed),
            detail: !settings.detail.is_neutral(),
        }
    }

    /// True when no per-pixel operator would change anything.
    fn is_identity(&self) -> bool {
        self.basic.is_neutral()
            && self.temperature.is_none()
            && self.tint == 0.0
            && self.curves.is_identity()
            && self.hsl.is_neutral()
            && self.vibrance == 0.0
            && self.saturation == 0.0
            && self.split_toning.is_neutral()
            && self.dehaze == 0.0
            && self.vignette.is_none()
            && self.grain.is_none()
            && !self.detail
    }

    /// Run the pointwise and position-dependent operators in order.
    #[inline]
    fn apply(&self, r: f32, g: f32, b: f32, x: u32, y: u32) -> (f32, f32, f32) {
        let basic = &self.basic;
        let (mut r, mut g, mut b) = (r, g, b);

        if let Some(m) = self.temperature {
            (r, g, b) = apply_temperature(r, g, b, m);
        }
        (r, g, b) = apply_tint(r, g, b, self.tint);
        (r, g, b) = apply_exposure(r, g, b, basic.exposure);
        (r, g, b) = apply_contrast(r, g, b, basic.contrast);
        (r, g, b) = apply_highlights(r, g, b, basic.highlights);
        (r, g, b) = apply_shadows(r, g, b, basic.shadows);
        (r, g, b) = apply_whites(r, g, b, basic.whites);
        (r, g, b) = apply_blacks(r, g, b, basic.blacks);
        (r, g, b) = self.curves.apply(r, g, b);
        (r, g, b) = apply_hsl_bands(r, g, b, &self.hsl);
        (r, g, b) = apply_vibrance(r, g, b, self.vibrance);
        (r, g, b) = apply_saturation(r, g, b, self.saturation);
        (r, g, b) = apply_split_toning(r, g, b, &self.split_toning);
        (r, g, b) = apply_dehaze(r, g, b, self.dehaze);

        if let Some(vignette) = &self.vignette {
            let factor = vignette.factor(x, y, luminance(r, g, b));
            (r, g, b) = (r * factor, g * factor, b * factor);
        }
        if let Some(grain) = &self.grain {
            (r, g, b) = apply_grain(r, g, b, x, y, grain);
        }
        (r, g, b)
    }
}
