//! Quantizer builder and pipeline entry points.

use std::sync::Arc;
use std::time::Instant;

use super::error::QuantizeError;
use crate::dither::blue_noise::{dither_blue_noise, DEFAULT_SEED};
use crate::dither::pointwise::{quantize_nearest, quantize_simple};
use crate::dither::{
    Backend, DitherEngine, DitherMethod, DitherOptions, DitherProgress, EngineError, Kernel,
    ReferenceDitherer, WindowedDitherer,
};
use crate::image::RgbImage;
use crate::matcher::{ColorMatcher, LookupCache};
use crate::output::QuantizedImage;
use crate::palette::{DistanceMetric, Palette};

/// Top-level quantization entry point.
///
/// A `Quantizer` owns a [`ColorMatcher`] (palette plus lookup cache) and a
/// diffusion backend chosen at construction. All methods take `&self`, and
/// the quantizer is `Send + Sync`, so one instance can serve concurrent
/// calls; per-call scratch state never outlives a call.
///
/// # Example
///
/// ```
/// use eink_quantize::{DitherMethod, Palette, Quantizer, Rgb, RgbImage};
///
/// let quantizer = Quantizer::builder(Palette::monochrome()).build().unwrap();
/// let image = RgbImage::filled(2, 1, Rgb::new(128, 128, 128)).unwrap();
///
/// let result = quantizer.dither(&image, DitherMethod::FloydSteinberg);
/// assert_eq!(result.to_rgb(), vec![Rgb::WHITE, Rgb::BLACK]);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    matcher: ColorMatcher,
    options: DitherOptions,
    backend: Backend,
    accelerated: Arc<dyn DitherEngine>,
    seed: u64,
}

/// Fluent configuration for [`Quantizer`].
#[derive(Debug, Clone)]
pub struct QuantizerBuilder {
    palette: Arc<Palette>,
    cache_step: u8,
    metric: DistanceMetric,
    cache: Option<Arc<LookupCache>>,
    options: DitherOptions,
    backend: Backend,
    accelerated: Option<Arc<dyn DitherEngine>>,
    seed: u64,
}

impl QuantizerBuilder {
    fn new(palette: Arc<Palette>) -> Self {
        Self {
            palette,
            cache_step: LookupCache::DEFAULT_STEP,
            metric: DistanceMetric::default(),
            cache: None,
            options: DitherOptions::default(),
            backend: Backend::default(),
            accelerated: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Lookup cache bucket width (default 4).
    #[inline]
    pub fn cache_step(mut self, step: u8) -> Self {
        self.cache_step = step;
        self
    }

    /// Metric used to fill the lookup cache (default simplified CIEDE2000).
    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Reuse an already built cache instead of building one.
    #[inline]
    pub fn cache(mut self, cache: Arc<LookupCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.options = self.options.serpentine(enabled);
        self
    }

    #[inline]
    pub fn options(mut self, options: DitherOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Engine tried first under [`Backend::Accelerated`].
    ///
    /// Defaults to [`WindowedDitherer`].
    #[inline]
    pub fn accelerated_engine(mut self, engine: Arc<dyn DitherEngine>) -> Self {
        self.accelerated = Some(engine);
        self
    }

    /// Seed for [`DitherMethod::BlueNoise`] (default 42).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the matcher and cache.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidCacheStep`] for a zero step, or
    /// [`QuantizeError::CacheMismatch`] for a prebuilt cache of another
    /// palette.
    pub fn build(self) -> Result<Quantizer, QuantizeError> {
        let start = Instant::now();
        let matcher = match self.cache {
            Some(cache) => ColorMatcher::with_cache(self.palette, cache)?,
            None => ColorMatcher::with_metric(self.palette, self.cache_step, self.metric)?,
        };
        let accelerated = self
            .accelerated
            .unwrap_or_else(|| Arc::new(WindowedDitherer));

        tracing::info!(
            colors = matcher.palette().len(),
            buckets = matcher.cache().len(),
            step = matcher.cache().step(),
            backend = ?self.backend,
            engine = accelerated.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Quantizer ready"
        );

        Ok(Quantizer {
            matcher,
            options: self.options,
            backend: self.backend,
            accelerated,
            seed: self.seed,
        })
    }
}

impl Quantizer {
    /// Start configuring a quantizer for `palette`.
    pub fn builder(palette: impl Into<Arc<Palette>>) -> QuantizerBuilder {
        QuantizerBuilder::new(palette.into())
    }

    /// Quantizer with default settings.
    pub fn new(palette: impl Into<Arc<Palette>>) -> Result<Self, QuantizeError> {
        Self::builder(palette).build()
    }

    #[inline]
    pub fn palette(&self) -> &Arc<Palette> {
        self.matcher.palette()
    }

    #[inline]
    pub fn matcher(&self) -> &ColorMatcher {
        &self.matcher
    }

    #[inline]
    pub fn options(&self) -> DitherOptions {
        self.options
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Map each pixel to its perceptually nearest entry, no diffusion.
    pub fn quantize_nearest(&self, image: &RgbImage) -> QuantizedImage {
        self.wrap(image, quantize_nearest(image, &self.matcher), DitherMethod::Nearest)
    }

    /// Map each pixel by RGB Euclidean distance, no diffusion.
    pub fn quantize_simple(&self, image: &RgbImage) -> QuantizedImage {
        self.wrap(image, quantize_simple(image, self.palette()), DitherMethod::Simple)
    }

    /// Seeded two-nearest random dithering.
    ///
    /// The same seed and input give the same output. Entries at equal
    /// distance rank in palette declaration order.
    pub fn dither_blue_noise(&self, image: &RgbImage, seed: u64) -> QuantizedImage {
        self.wrap(
            image,
            dither_blue_noise(image, self.palette(), seed),
            DitherMethod::BlueNoise,
        )
    }

    /// Quantize `image` with `method`.
    pub fn dither(&self, image: &RgbImage, method: DitherMethod) -> QuantizedImage {
        self.dither_with_progress(image, method, &mut |_| {})
    }

    /// Quantize `image` with `method`, reporting row progress.
    ///
    /// `progress` is called after every row of an error diffusion pass. If
    /// the accelerated engine fails part way, rows are reported again by
    /// the reference pass. Pointwise methods report nothing.
    pub fn dither_with_progress(
        &self,
        image: &RgbImage,
        method: DitherMethod,
        progress: &mut dyn FnMut(DitherProgress),
    ) -> QuantizedImage {
        let start = Instant::now();
        let pixels = image.width() * image.height();
        tracing::info!(
            %method,
            width = image.width(),
            height = image.height(),
            pixels,
            "Dithering"
        );

        let result = match method.kernel() {
            Some(kernel) => {
                let positions = self.diffuse(image, kernel, progress);
                self.wrap(image, positions, method)
            }
            None => match method {
                DitherMethod::Simple => self.quantize_simple(image),
                DitherMethod::BlueNoise => self.dither_blue_noise(image, self.seed),
                _ => self.quantize_nearest(image),
            },
        };

        let elapsed = start.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            pixels as f64 / elapsed
        } else {
            0.0
        };
        tracing::info!(
            %method,
            elapsed = format!("{elapsed:.2}s"),
            pixels_per_sec = rate.round() as u64,
            "Dithering completed"
        );

        result
    }

    /// Run error diffusion on the configured backend.
    fn diffuse(
        &self,
        image: &RgbImage,
        kernel: &Kernel,
        progress: &mut dyn FnMut(DitherProgress),
    ) -> Vec<u8> {
        if self.backend == Backend::Accelerated {
            let expected = image.width() * image.height();
            let mut report = milestones(kernel, progress);
            let outcome = self
                .accelerated
                .diffuse(image, &self.matcher, kernel, &self.options, &mut report)
                .and_then(|positions| {
                    if positions.len() == expected {
                        Ok(positions)
                    } else {
                        Err(EngineError::OutputSize {
                            expected,
                            actual: positions.len(),
                        })
                    }
                });

            match outcome {
                Ok(positions) => return positions,
                Err(err) => tracing::warn!(
                    engine = self.accelerated.name(),
                    error = %err,
                    "Accelerated dithering failed, falling back to reference"
                ),
            }
        }

        let mut report = milestones(kernel, progress);
        ReferenceDitherer.run(image, &self.matcher, kernel, &self.options, &mut report)
    }

    fn wrap(&self, image: &RgbImage, positions: Vec<u8>, method: DitherMethod) -> QuantizedImage {
        QuantizedImage::new(
            positions,
            image.width(),
            image.height(),
            Arc::clone(self.palette()),
            method,
        )
    }
}

/// Forward row progress, logging each completed quarter.
fn milestones<'a>(
    kernel: &'a Kernel,
    progress: &'a mut dyn FnMut(DitherProgress),
) -> impl FnMut(DitherProgress) + 'a {
    let mut next_quarter = 1u32;
    move |p: DitherProgress| {
        while next_quarter <= 4 && p.fraction() * 4.0 >= f64::from(next_quarter) {
            tracing::debug!(
                kernel = kernel.name,
                rows = p.rows_done,
                total = p.total_rows,
                "Dithering progress {}%",
                next_quarter * 25
            );
            next_quarter += 1;
        }
        progress(p);
    }
}
