//! Lens distortion and chromatic aberration remapping.
//!
//! For every output pixel the source position is found by scaling its
//! normalized offset from the image center by `1 + k * r²`, with
//! `k = distortion / 500`. Red and blue then get their own extra radial
//! scale for chromatic aberration; green is the reference.

use tracing::debug;

use crate::filter::sample_bilinear;
use crate::rows::for_each_row;
use crate::settings::LensCorrectionSettings;

/// Lens correction resolved for one image size.
#[derive(Debug, Clone, Copy)]
pub struct LensRemap {
    k: f32,
    scale_red: f32,
    scale_blue: f32,
    width: usize,
    height: usize,
}

impl LensRemap {
    /// Resolve settings. Returns `None` when no term is active.
    pub fn new(settings: &LensCorrectionSettings, width: u32, height: u32) -> Option<Self> {
        if !settings.is_active() {
            return None;
        }
        Some(Self {
            k: settings.distortion / 500.0,
            scale_red: 1.0 + settings.ca_red_cyan / 100.0 * 0.01,
            scale_blue: 1.0 + settings.ca_blue_yellow / 100.0 * 0.01,
            width: width as usize,
            height: height as usize,
        })
    }

    fn has_aberration(&self) -> bool {
        self.scale_red != 1.0 || self.scale_blue != 1.0
    }

    /// Source pixel coordinates for the red, green and blue channels of
    /// output pixel (x, y).
    pub fn source_coords(&self, x: usize, y: usize) -> [(f32, f32); 3] {
        let w = self.width as f32;
        let h = self.height as f32;
        let nx = (x as f32 + 0.5) / w * 2.0 - 1.0;
        let ny = (y as f32 + 0.5) / h * 2.0 - 1.0;
        let factor = 1.0 + self.k * (nx * nx + ny * ny);
        let (dx, dy) = (nx * factor, ny * factor);

        let to_pixel = |scale: f32| {
            (
                (dx * scale + 1.0) * 0.5 * w - 0.5,
                (dy * scale + 1.0) * 0.5 * h - 0.5,
            )
        };
        [
            to_pixel(self.scale_red),
            to_pixel(1.0),
            to_pixel(self.scale_blue),
        ]
    }

    /// Resample an interleaved normalized RGB plane. Positions that map
    /// outside the source become black.
    pub fn remap_plane(&self, rgb: &[f32]) -> Vec<f32> {
        debug!(
            width = self.width,
            height = self.height,
            k = self.k,
            scale_red = self.scale_red,
            scale_blue = self.scale_blue,
            "Lens correction remap"
        );
        let (w, h) = (self.width, self.height);
        let mut out = vec![0.0f32; rgb.len()];
        let aberration = self.has_aberration();

        for_each_row(&mut out, w * 3, |y, row| {
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let [red, green, blue] = self.source_coords(x, y);
                let g = sample_bilinear::<f32, 3>(rgb, w, h, green.0, green.1);
                if aberration {
                    px[0] = sample_bilinear::<f32, 3>(rgb, w, h, red.0, red.1)[0];
                    px[1] = g[1];
                    px[2] = sample_bilinear::<f32, 3>(rgb, w, h, blue.0, blue.1)[2];
                } else {
                    px.copy_from_slice(&g);
                }
            }
        });
        out
    }
}
