//! Saturation, contrast, brightness and gamma adjustments.
//!
//! Each adjustment blends the image with a degenerate version of itself
//! (grey for saturation, the mean luma for contrast, black for brightness)
//! by a factor, then rounds and clamps back to 8 bits. A factor of `1.0`
//! leaves the image unchanged.

use crate::color::Rgb;
use crate::image::RgbImage;

/// Tone adjustments, applied in field order.
///
/// # Example
///
/// ```
/// use eink_quantize::{Enhancement, Rgb, RgbImage};
///
/// let image = RgbImage::filled(2, 2, Rgb::new(200, 80, 40)).unwrap();
/// let enhanced = Enhancement::vibrant().apply(&image);
/// assert_eq!(enhanced.width(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enhancement {
    /// Replace every pixel with its luma grey first.
    pub grayscale: bool,
    /// Gamma lift `255 * (v / 255)^(1 / gamma)`, truncated.
    pub gamma: Option<f64>,
    /// Blend factor against the pixel's luma grey.
    pub saturation: f64,
    /// Blend factor against the image's mean luma.
    pub contrast: f64,
    /// Blend factor against black.
    pub brightness: f64,
}

impl Default for Enhancement {
    fn default() -> Self {
        Self::none()
    }
}

impl Enhancement {
    /// Identity adjustment.
    pub fn none() -> Self {
        Self {
            grayscale: false,
            gamma: None,
            saturation: 1.0,
            contrast: 1.0,
            brightness: 1.0,
        }
    }

    /// Color panels: saturation ×1.3, contrast ×1.1, brightness ×1.05.
    pub fn vibrant() -> Self {
        Self {
            saturation: 1.3,
            contrast: 1.1,
            brightness: 1.05,
            ..Self::none()
        }
    }

    /// Black and white panels: luma grey, gamma 2.2 lift, contrast ×1.15.
    pub fn monochrome() -> Self {
        Self {
            grayscale: true,
            gamma: Some(2.2),
            contrast: 1.15,
            ..Self::none()
        }
    }

    pub fn saturation(mut self, factor: f64) -> Self {
        self.saturation = factor;
        self
    }

    pub fn contrast(mut self, factor: f64) -> Self {
        self.contrast = factor;
        self
    }

    pub fn brightness(mut self, factor: f64) -> Self {
        self.brightness = factor;
        self
    }

    pub fn gamma(mut self, gamma: Option<f64>) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::none()
    }

    /// Return an adjusted copy of `image`.
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut pixels = image.pixels().to_vec();

        if self.grayscale {
            for p in &mut pixels {
                let l = p.luma();
                *p = Rgb::new(l, l, l);
            }
        }

        if let Some(gamma) = self.gamma.filter(|g| *g > 0.0) {
            let lut: Vec<u8> = (0..=255u8)
                .map(|v| (255.0 * (v as f64 / 255.0).powf(1.0 / gamma)) as u8)
                .collect();
            for p in &mut pixels {
                *p = Rgb::new(lut[p.r as usize], lut[p.g as usize], lut[p.b as usize]);
            }
        }

        if self.saturation != 1.0 {
            for p in &mut pixels {
                let grey = p.luma();
                *p = blend_rgb(*p, Rgb::new(grey, grey, grey), self.saturation);
            }
        }

        if self.contrast != 1.0 {
            let mean = mean_luma(&pixels);
            let degenerate = Rgb::new(mean, mean, mean);
            for p in &mut pixels {
                *p = blend_rgb(*p, degenerate, self.contrast);
            }
        }

        if self.brightness != 1.0 {
            for p in &mut pixels {
                *p = blend_rgb(*p, Rgb::BLACK, self.brightness);
            }
        }

        RgbImage::from_parts(image.width(), image.height(), pixels)
    }
}

/// `degenerate + factor * (pixel - degenerate)`, rounded and clamped.
#[inline]
fn blend_rgb(pixel: Rgb, degenerate: Rgb, factor: f64) -> Rgb {
    let blend = |c: u8, d: u8| {
        let (c, d) = (c as f64, d as f64);
        (d + factor * (c - d)).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        blend(pixel.r, degenerate.r),
        blend(pixel.g, degenerate.g),
        blend(pixel.b, degenerate.b),
    )
}

/// Mean luma, rounded.
fn mean_luma(pixels: &[Rgb]) -> u8 {
    if pixels.is_empty() {
        return 0;
    }
    let sum: u64 = pixels.iter().map(|p| p.luma() as u64).sum();
    (sum as f64 / pixels.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(pixels: Vec<Rgb>) -> RgbImage {
        let w = pixels.len();
        RgbImage::new(w, 1, pixels).unwrap()
    }

    #[test]
    fn test_identity() {
        let img = image(vec![Rgb::new(1, 2, 3), Rgb::new(200, 100, 50)]);
        assert_eq!(Enhancement::none().apply(&img), img);
        assert!(Enhancement::default().is_identity());
    }

    #[test]
    fn test_greys_unaffected_by_saturation() {
        let img = image(vec![Rgb::new(77, 77, 77)]);
        let out = Enhancement::none().saturation(1.3).apply(&img);
        assert_eq!(out.get(0, 0), Rgb::new(77, 77, 77));
    }

    #[test]
    fn test_saturation_pushes_away_from_grey() {
        // luma(200, 100, 50) = (59800 + 58700 + 5700 + 500) / 1000 = 124
        let img = image(vec![Rgb::new(200, 100, 50)]);
        let out = Enhancement::none().saturation(1.3).apply(&img);
        // 124 + 1.3 * 76 = 222.8, 124 - 1.3 * 24 = 92.8, 124 - 1.3 * 74 = 27.8
        assert_eq!(out.get(0, 0), Rgb::new(223, 93, 28));
    }

    #[test]
    fn test_contrast_around_mean() {
        let img = image(vec![Rgb::new(100, 100, 100), Rgb::new(200, 200, 200)]);
        let out = Enhancement::none().contrast(1.1).apply(&img);
        // mean 150: 150 - 55 = 95, 150 + 55 = 205
        assert_eq!(out.get(0, 0), Rgb::new(95, 95, 95));
        assert_eq!(out.get(1, 0), Rgb::new(205, 205, 205));
    }

    #[test]
    fn test_brightness_clamps() {
        let img = image(vec![Rgb::new(250, 100, 0)]);
        let out = Enhancement::none().brightness(1.05).apply(&img);
        assert_eq!(out.get(0, 0), Rgb::new(255, 105, 0));
    }

    #[test]
    fn test_monochrome_outputs_grey() {
        let img = image(vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255), Rgb::new(30, 200, 90)]);
        let out = Enhancement::monochrome().apply(&img);
        for p in out.pixels() {
            assert!(p.r == p.g && p.g == p.b, "{p}");
        }
    }

    #[test]
    fn test_gamma_lifts_midtones() {
        let img = image(vec![Rgb::new(0, 0, 0), Rgb::new(64, 64, 64), Rgb::WHITE]);
        let out = Enhancement::none().gamma(Some(2.2)).apply(&img);
        assert_eq!(out.get(0, 0), Rgb::BLACK);
        assert!(out.get(1, 0).r > 64);
        assert_eq!(out.get(2, 0), Rgb::WHITE);
    }
}
