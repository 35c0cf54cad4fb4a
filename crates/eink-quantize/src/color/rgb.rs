//! 8-bit sRGB color type

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit color in sRGB color space.
///
/// This is the pixel type of input rasters and of every palette entry. The
/// quantizer never produces an `Rgb` that is not exactly one of the palette's
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black, `(0, 0, 0)`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White, `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    ///
    /// ```
    /// use eink_quantize::Rgb;
    /// assert_eq!(Rgb::from_bytes([255, 0, 0]), Rgb::new(255, 0, 0));
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Round and clamp float channel values into an `Rgb`.
    ///
    /// Used to key colors read back from the floating-point working buffer.
    #[inline]
    pub fn from_f32_rounded(channels: [f32; 3]) -> Self {
        Self::new(
            channels[0].round().clamp(0.0, 255.0) as u8,
            channels[1].round().clamp(0.0, 255.0) as u8,
            channels[2].round().clamp(0.0, 255.0) as u8,
        )
    }

    /// Channels as `f32`, for error arithmetic.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Squared Euclidean distance in 8-bit RGB space.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// ITU-R 601-2 luma, rounded to 8 bits.
    #[inline]
    pub fn luma(self) -> u8 {
        let l = (self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114 + 500) / 1000;
        l.min(255) as u8
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    /// Formats as `#RRGGBB`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// ```
    /// use eink_quantize::Rgb;
    ///
    /// let orange: Rgb = "#FFA500".parse().unwrap();
    /// assert_eq!(orange, Rgb::new(255, 165, 0));
    ///
    /// let red: Rgb = "f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
