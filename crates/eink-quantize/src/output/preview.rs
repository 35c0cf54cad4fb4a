//! Diagnostic images: palette swatches and before/after comparison.

use crate::color::Rgb;
use crate::image::{ImageError, RgbImage};
use crate::palette::Palette;

/// A horizontal strip of palette swatches.
///
/// Each entry gets a `width / len` wide block in declaration order; any
/// remaining columns on the right stay white.
pub fn palette_preview(palette: &Palette, width: usize, height: usize) -> Result<RgbImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::ZeroDimension { width, height });
    }
    let swatch = width / palette.len();
    let mut pixels = vec![Rgb::WHITE; width * height];

    for (i, entry) in palette.iter().enumerate() {
        let x0 = i * swatch;
        for row in pixels.chunks_mut(width) {
            row[x0..x0 + swatch].fill(entry.rgb());
        }
    }

    RgbImage::new(width, height, pixels)
}

/// `original` and `quantized` next to each other on a white canvas.
///
/// The canvas is twice the original's width and as tall as the original;
/// the quantized image starts at the original's right edge and is clipped
/// to the canvas.
pub fn side_by_side(original: &RgbImage, quantized: &RgbImage) -> RgbImage {
    let (w, h) = (original.width(), original.height());
    let canvas_width = w * 2;
    let mut pixels = vec![Rgb::WHITE; canvas_width * h];

    for (y, row) in pixels.chunks_mut(canvas_width).enumerate() {
        row[..w].copy_from_slice(original.row(y));
        if y < quantized.height() {
            let n = quantized.width().min(w);
            row[w..w + n].copy_from_slice(&quantized.row(y)[..n]);
        }
    }

    RgbImage::from_parts(canvas_width, h, pixels)
}
