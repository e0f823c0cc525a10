//! RGBA8 bitmap type shared by every operation in the crate.
//!
//! A [`Bitmap`] is immutable once constructed. Operations that "modify" an
//! image always allocate and return a new bitmap, so a caller holding the
//! source can keep using it (non-destructive editing).

use crate::color::{denormalize, normalize};
use crate::error::{Error, Result};

/// Number of bytes per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// An RGBA8 image in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Byte length of a `width` x `height` RGBA buffer.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(CHANNELS))
        .ok_or(Error::InvalidDimensions { width, height })
}

impl Bitmap {
    /// Create a bitmap from raw RGBA bytes.
    ///
    /// # Errors
    /// - [`Error::InvalidDimensions`] if width or height is zero, or the byte
    ///   size does not fit in `usize`
    /// - [`Error::BufferSizeMismatch`] if `pixels.len() != width * height * 4`
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a bitmap filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = byte_len(width, height)?;
        let pixels = rgba.iter().copied().cycle().take(len).collect();
        Self::new(width, height, pixels)
    }

    /// Build from a buffer whose length the caller already guarantees.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Bitmap from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert to an `image::RgbaImage` for encoding or further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the bitmap and return its RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte offset of pixel (x, y).
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// RGBA value at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Normalized RGB planes interleaved as `[r, g, b, r, g, b, ...]`.
    ///
    /// Alpha is dropped; it is always copied verbatim from the source bitmap.
    pub fn to_normalized_rgb(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels.chunks_exact(CHANNELS) {
            let (r, g, b) = normalize(px[0], px[1], px[2]);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    /// Rebuild a bitmap from normalized RGB data, taking alpha from `alpha_source`.
    pub(crate) fn from_normalized_rgb(rgb: &[f32], alpha_source: &Bitmap) -> Self {
        let mut pixels = Vec::with_capacity(alpha_source.pixels.len());
        for (c, src) in rgb
            .chunks_exact(3)
            .zip(alpha_source.pixels.chunks_exact(CHANNELS))
        {
            let (r, g, b) = denormalize(c[0], c[1], c[2]);
            pixels.extend_from_slice(&[r, g, b, src[3]]);
        }
        Self::from_parts(alpha_source.width, alpha_source.height, pixels)
    }
}
