//! Result of a quantization call.

use std::sync::Arc;

use super::pack::{min_bit_depth, pack_nbits, PackError};
use crate::color::Rgb;
use crate::dither::DitherMethod;
use crate::image::RgbImage;
use crate::palette::{Palette, PaletteEntry};

/// A raster whose every pixel is a palette entry.
///
/// Stores one declaration position per pixel in row-major order. RGB
/// pixels, wire indices and packed rows are derived on demand.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use eink_quantize::{DitherMethod, Palette, QuantizedImage};
///
/// let image = QuantizedImage::new(
///     vec![0, 1, 1, 0],
///     2,
///     2,
///     Arc::new(Palette::monochrome()),
///     DitherMethod::Nearest,
/// );
///
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// assert_eq!(image.packed(1).unwrap(), vec![0b0100_0000, 0b1000_0000]);
/// ```
#[derive(Debug, Clone)]
pub struct QuantizedImage {
    positions: Vec<u8>,
    width: usize,
    height: usize,
    palette: Arc<Palette>,
    method: DitherMethod,
}

impl QuantizedImage {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `positions.len() == width * height`.
    pub fn new(
        positions: Vec<u8>,
        width: usize,
        height: usize,
        palette: Arc<Palette>,
        method: DitherMethod,
    ) -> Self {
        debug_assert_eq!(
            positions.len(),
            width * height,
            "positions length ({}) must match width * height ({}x{}={})",
            positions.len(),
            width,
            height,
            width * height,
        );
        Self {
            positions,
            width,
            height,
            palette,
            method,
        }
    }

    /// Palette declaration positions, row-major.
    #[inline]
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Method that produced this image.
    #[inline]
    pub fn method(&self) -> DitherMethod {
        self.method
    }

    /// Palette entry at `(x, y)`.
    pub fn entry_at(&self, x: usize, y: usize) -> &PaletteEntry {
        self.palette
            .entry(self.positions[y * self.width + x] as usize)
    }

    /// Pixels as palette RGB values.
    pub fn to_rgb(&self) -> Vec<Rgb> {
        self.positions
            .iter()
            .map(|&p| self.palette.entry(p as usize).rgb())
            .collect()
    }

    /// Flat `[R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.positions.len() * 3);
        for &p in &self.positions {
            rgb.extend_from_slice(&self.palette.entry(p as usize).rgb().to_bytes());
        }
        rgb
    }

    /// As an [`RgbImage`], e.g. for comparison images.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_parts(self.width, self.height, self.to_rgb())
    }

    /// Driver wire index for every pixel.
    pub fn wire_indices(&self) -> Vec<u8> {
        let map = self.palette.wire_indices();
        self.positions.iter().map(|&p| map[p as usize]).collect()
    }

    /// Smallest bit depth that holds every wire index of the palette.
    pub fn wire_bit_depth(&self) -> u8 {
        min_bit_depth(self.palette.wire_indices().into_iter().max().unwrap_or(0))
    }

    /// Wire indices packed MSB-first at `bits` per pixel, rows byte-aligned.
    pub fn packed(&self, bits: u8) -> Result<Vec<u8>, PackError> {
        pack_nbits(&self.wire_indices(), self.width, bits)
    }

    /// Pixel count per palette position.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.palette.len()];
        for &p in &self.positions {
            counts[p as usize] += 1;
        }
        counts
    }
}
