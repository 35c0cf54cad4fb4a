use eink_quantize::{ImageError, PackError, PaletteError, QuantizeError, UnknownVariant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid setting: {0}")]
    Setting(#[from] UnknownVariant),

    #[error("Quantizer error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColorType(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Pack error: {0}")]
    Pack(#[from] PackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_config() {
        let error = AppError::Config("bad yaml".to_string());
        assert_eq!(error.to_string(), "Config error: bad yaml");
    }

    #[test]
    fn test_render_error_png_decode() {
        let error = RenderError::PngDecode("truncated".to_string());
        assert_eq!(error.to_string(), "PNG decode error: truncated");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 0,
            height: 480,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 0x480");
    }

    #[test]
    fn test_app_error_from_render_error() {
        let render_error = RenderError::PngEncode("x".to_string());
        let app_error: AppError = render_error.into();
        match app_error {
            AppError::Render(_) => {}
            _ => panic!("Expected Render variant"),
        }
    }

    #[test]
    fn test_app_error_from_palette_error() {
        let app_error: AppError = PaletteError::EmptyPalette.into();
        assert!(matches!(app_error, AppError::Palette(_)));
    }
}
