use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use eink_quantize::{DitherMethod, Enhancement, Palette, QuantizedImage, Quantizer, RgbImage};

use crate::error::AppError;
use crate::models::{AppConfig, ColorMode, DisplaySpec};
use crate::rendering::png_io;

/// Enhance-then-dither pipeline for one target panel
#[derive(Debug)]
pub struct SpriteProcessor {
    quantizer: Quantizer,
    method: DitherMethod,
    enhancement: Enhancement,
    display: DisplaySpec,
}

impl SpriteProcessor {
    pub fn new(
        quantizer: Quantizer,
        method: DitherMethod,
        enhancement: Enhancement,
        display: DisplaySpec,
    ) -> Self {
        Self {
            quantizer,
            method,
            enhancement,
            display,
        }
    }

    /// Build the processor described by a configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let spec = config.display_spec();
        let ip = &config.image_processing;
        let palette: Arc<Palette> = Arc::new(config.build_palette(spec.color_mode)?);

        let quantizer = Quantizer::builder(palette)
            .cache_step(ip.cache_step)
            .metric(ip.metric()?)
            .serpentine(ip.serpentine)
            .backend(ip.backend()?)
            .seed(ip.seed)
            .build()?;

        let enhancement = if ip.enhance {
            spec.color_mode.enhancement()
        } else {
            Enhancement::none()
        };

        tracing::info!(
            display = spec.name,
            color_mode = %spec.color_mode,
            method = %ip.method(),
            enhance = ip.enhance,
            "Sprite processor ready"
        );

        Ok(Self::new(quantizer, ip.method(), enhancement, spec))
    }

    /// Replace the dithering method
    pub fn with_method(mut self, method: DitherMethod) -> Self {
        self.method = method;
        self
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn method(&self) -> DitherMethod {
        self.method
    }

    pub fn display(&self) -> DisplaySpec {
        self.display
    }

    pub fn color_mode(&self) -> ColorMode {
        self.display.color_mode
    }

    /// Apply the enhancement, borrowing the input when it is the identity
    pub fn prepare<'a>(&self, image: &'a RgbImage) -> Cow<'a, RgbImage> {
        if self.enhancement.is_identity() {
            Cow::Borrowed(image)
        } else {
            Cow::Owned(self.enhancement.apply(image))
        }
    }

    /// Enhance and dither an image
    pub fn process(&self, image: &RgbImage) -> QuantizedImage {
        let start = Instant::now();
        if !self
            .display
            .fits(image.width() as u32, image.height() as u32)
        {
            tracing::warn!(
                width = image.width(),
                height = image.height(),
                display = self.display.name,
                "Image is larger than the panel"
            );
        }

        let prepared = self.prepare(image);
        let enhanced_ms = start.elapsed().as_millis();

        let result = self.quantizer.dither(&prepared, self.method);
        tracing::info!(
            method = %self.method,
            usage = %usage_summary(&result),
            enhance_ms = enhanced_ms,
            total_ms = start.elapsed().as_millis(),
            "Sprite processed"
        );
        result
    }

    /// Enhance, dither and encode as an indexed PNG
    pub fn render_png(&self, image: &RgbImage) -> Result<(QuantizedImage, Vec<u8>), AppError> {
        let quantized = self.process(image);
        let png = png_io::encode_indexed_png(&quantized)?;
        Ok((quantized, png))
    }
}

/// Pixel count per palette entry, e.g. `BLACK=12 WHITE=88`.
///
/// Entries are listed in palette order; unused entries are skipped.
pub fn usage_summary(image: &QuantizedImage) -> String {
    image
        .palette()
        .iter()
        .zip(image.histogram())
        .filter(|&(_, count)| count > 0)
        .map(|(entry, count)| format!("{}={count}", entry.name()))
        .collect::<Vec<_>>()
        .join(" ")
}
