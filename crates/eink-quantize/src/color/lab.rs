//! CIE L\*a\*b\* color space
//!
//! The conversion follows the classic sRGB → XYZ → L\*a\*b\* chain with the
//! D65 reference white. Constants are fixed: changing any of them moves
//! nearest-color decisions and therefore every dithered output.

use super::lut::srgb_to_linear;
use super::rgb::Rgb;

/// D65 reference white, X component.
const XN: f64 = 0.95047;
/// D65 reference white, Y component.
const YN: f64 = 1.0;
/// D65 reference white, Z component.
const ZN: f64 = 1.08883;

/// Threshold below which `f(t)` switches to its linear segment.
const EPSILON: f64 = 0.008856;
/// Slope of the linear segment of `f(t)`.
const KAPPA_SLOPE: f64 = 7.787;

/// A color in CIE L\*a\*b\* space.
///
/// - `l`: lightness, 0.0 (black) to 100.0 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma magnitude `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Components as a tuple `(L, a, b)`.
    #[inline]
    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.l, self.a, self.b)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        let r = srgb_to_linear(rgb.r);
        let g = srgb_to_linear(rgb.g);
        let b = srgb_to_linear(rgb.b);

        let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
        let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
        let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

        let fx = lab_f(x / XN);
        let fy = lab_f(y / YN);
        let fz = lab_f(z / ZN);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// Convert an 8-bit sRGB triple to CIE L\*a\*b\*.
///
/// ```
/// use eink_quantize::rgb_to_lab;
///
/// let (l, a, b) = rgb_to_lab((255, 255, 255));
/// assert!((l - 100.0).abs() < 1e-3);
/// assert!(a.abs() < 1e-2 && b.abs() < 1e-2);
/// ```
#[inline]
pub fn rgb_to_lab(rgb: (u8, u8, u8)) -> (f64, f64, f64) {
    Lab::from(Rgb::from(rgb)).to_tuple()
}
