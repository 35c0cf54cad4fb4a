//! Dense RGB raster input.

use thiserror::Error;

use crate::color::Rgb;

/// Error type for raster construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Width or height is zero
    #[error("image dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },

    /// Buffer does not hold `width * height` pixels
    #[error("expected {expected} {unit} for {width}x{height}, got {actual}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
        unit: &'static str,
    },
}

/// Row-major 8-bit RGB image with alpha already flattened.
///
/// The pixel count always equals `width * height`; constructors reject
/// anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap a pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ImageError> {
        check_dimensions(width, height, pixels.len(), 1, "pixels")?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap a buffer whose length is already known to match.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, ImageError> {
        Self::new(width, height, vec![color; width * height])
    }

    /// Build from packed `RGBRGB...` bytes.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        check_dimensions(width, height, bytes.len(), 3, "RGB bytes")?;
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from packed `RGBA` bytes, compositing onto white.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        check_dimensions(width, height, bytes.len(), 4, "RGBA bytes")?;
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| flatten_on_white(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
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
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Packed `RGBRGB...` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

fn check_dimensions(
    width: usize,
    height: usize,
    actual: usize,
    per_pixel: usize,
    unit: &'static str,
) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::ZeroDimension { width, height });
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(per_pixel))
        .unwrap_or(usize::MAX);
    if actual != expected {
        return Err(ImageError::LengthMismatch {
            width,
            height,
            expected,
            actual,
            unit,
        });
    }
    Ok(())
}

/// Alpha composite one pixel onto a white background.
#[inline]
fn flatten_on_white(r: u8, g: u8, b: u8, a: u8) -> Rgb {
    if a == 255 {
        return Rgb::new(r, g, b);
    }
    let alpha = a as u32;
    let inv = 255 - alpha;
    let blend = |c: u8| ((c as u32 * alpha + 255 * inv + 127) / 255) as u8;
    Rgb::new(blend(r), blend(g), blend(b))
}
