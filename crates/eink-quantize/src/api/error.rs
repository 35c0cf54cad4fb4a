//! Unified error type for the public API.

use thiserror::Error;

use crate::image::ImageError;
use crate::output::PackError;
use crate::palette::{PaletteError, ParseColorError};

/// Error type for building quantizers and producing output.
///
/// Wraps the module-level errors for convenient `?` propagation.
///
/// ```
/// use eink_quantize::{Palette, QuantizeError, Quantizer};
///
/// fn build() -> Result<Quantizer, QuantizeError> {
///     let palette = Palette::from_hex(&[("INK", "#000", 0), ("PAPER", "#fff", 1)])?;
///     Quantizer::builder(palette).cache_step(8).build()
/// }
/// # assert!(build().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    #[error("image error: {0}")]
    Image(#[from] ImageError),

    #[error("output error: {0}")]
    Pack(#[from] PackError),

    /// Bucket width of 0
    #[error("cache step must be between 1 and 255, got {step}")]
    InvalidCacheStep { step: u8 },

    /// A prebuilt cache does not belong to the palette
    #[error("lookup cache was built for {cache} colors, palette has {palette}")]
    CacheMismatch { cache: usize, palette: usize },
}

/// An unrecognized configuration name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// What was being parsed, e.g. `"dithering method"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_palette_error() {
        let err: QuantizeError = PaletteError::EmptyPalette.into();
        assert_eq!(err.to_string(), "palette error: palette cannot be empty");
    }

    #[test]
    fn test_invalid_step_message() {
        let err = QuantizeError::InvalidCacheStep { step: 0 };
        assert_eq!(err.to_string(), "cache step must be between 1 and 255, got 0");
    }

    #[test]
    fn test_unknown_variant() {
        let err = UnknownVariant::new("dithering method", "atkinson");
        assert_eq!(err.to_string(), "unknown dithering method: \"atkinson\"");
        assert_eq!(err.kind(), "dithering method");
        assert_eq!(err.value(), "atkinson");
    }
}
