//! Byte lookup tables: the fast path for pointwise recoloring.
//!
//! A UI that knows only exposure or contrast changed can build three
//! [`Lut`]s once and apply them with [`apply_luts`] instead of running the
//! full pipeline.

use tracing::debug;

use crate::adjustments::{apply_contrast, apply_exposure};
use crate::bitmap::{Bitmap, CHANNELS};
use crate::color::denormalize_channel;

/// Pre-computed 256-entry lookup table: `table[input] = output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    table: [u8; 256],
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lut {
    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self { table }
    }

    /// Wrap an existing table.
    pub fn from_table(table: [u8; 256]) -> Self {
        Self { table }
    }

    /// Build a table from a transfer function over normalized values.
    ///
    /// `f` receives `i / 255` for every byte `i`; its output is rounded and
    /// clamped back to a byte.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = denormalize_channel(f(i as f32 / 255.0));
        }
        Self { table }
    }

    /// Table for exposure followed by contrast, the usual slider fast path.
    pub fn exposure_contrast(exposure: f32, contrast: f32) -> Self {
        if exposure == 0.0 && contrast == 0.0 {
            return Self::identity();
        }
        Self::from_fn(|v| {
            let (v, _, _) = apply_exposure(v, v, v, exposure);
            let (v, _, _) = apply_contrast(v, v, v, contrast);
            v
        })
    }

    /// Output for `input`.
    #[inline]
    pub fn get(&self, input: u8) -> u8 {
        self.table[input as usize]
    }

    /// The raw table.
    pub fn as_table(&self) -> &[u8; 256] {
        &self.table
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| v == i as u8)
    }
}

/// Apply one LUT per channel, returning a new bitmap. Alpha is copied.
pub fn apply_luts(bitmap: &Bitmap, red: &Lut, green: &Lut, blue: &Lut) -> Bitmap {
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        "Applying channel LUTs"
    );

    let mut pixels = bitmap.pixels().to_vec();
    if red.is_identity() && green.is_identity() && blue.is_identity() {
        return Bitmap::from_parts(bitmap.width(), bitmap.height(), pixels);
    }

    for px in pixels.chunks_exact_mut(CHANNELS) {
        px[0] = red.get(px[0]);
        px[1] = green.get(px[1]);
        px[2] = blue.get(px[2]);
    }
    Bitmap::from_parts(bitmap.width(), bitmap.height(), pixels)
}
