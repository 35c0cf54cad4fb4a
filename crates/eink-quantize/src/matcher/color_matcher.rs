//! Palette + cache pairing with exact fallback.

use std::sync::Arc;

use super::lookup_cache::LookupCache;
use crate::api::QuantizeError;
use crate::color::{Lab, Rgb};
use crate::palette::{DistanceMetric, Palette, PaletteEntry};

/// Finds the palette entry closest to an RGB color.
///
/// Cloning is cheap: the palette and the cache are shared through `Arc`,
/// so one matcher can serve any number of concurrent dithering calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use eink_quantize::{ColorMatcher, Palette, Rgb};
///
/// let matcher = ColorMatcher::new(Arc::new(Palette::seven_color()), 4).unwrap();
/// assert_eq!(matcher.find_closest(Rgb::new(250, 10, 10)).name(), "RED");
/// ```
#[derive(Debug, Clone)]
pub struct ColorMatcher {
    palette: Arc<Palette>,
    cache: Arc<LookupCache>,
}

impl ColorMatcher {
    /// Build a matcher and its cache using the simplified CIEDE2000 metric.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::InvalidCacheStep`] when `step` is 0.
    pub fn new(palette: Arc<Palette>, step: u8) -> Result<Self, QuantizeError> {
        Self::with_metric(palette, step, DistanceMetric::Ciede2000Simplified)
    }

    /// Build a matcher whose cache is filled using `metric`.
    pub fn with_metric(
        palette: Arc<Palette>,
        step: u8,
        metric: DistanceMetric,
    ) -> Result<Self, QuantizeError> {
        let cache = LookupCache::build(&palette, step, metric)?;
        Ok(Self {
            palette,
            cache: Arc::new(cache),
        })
    }

    /// Pair a palette with an already built cache.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::CacheMismatch`] if the cache was built for a
    /// palette of a different size.
    pub fn with_cache(palette: Arc<Palette>, cache: Arc<LookupCache>) -> Result<Self, QuantizeError> {
        if cache.palette_len() != palette.len() {
            return Err(QuantizeError::CacheMismatch {
                cache: cache.palette_len(),
                palette: palette.len(),
            });
        }
        Ok(Self { palette, cache })
    }

    #[inline]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    #[inline]
    pub fn cache(&self) -> &Arc<LookupCache> {
        &self.cache
    }

    /// Closest entry through the cache.
    #[inline]
    pub fn find_closest(&self, rgb: Rgb) -> &PaletteEntry {
        self.palette.entry(self.closest_position(rgb))
    }

    /// Declaration position of the closest entry through the cache.
    #[inline]
    pub fn closest_position(&self, rgb: Rgb) -> usize {
        self.cache.lookup_or_compute(rgb, &self.palette)
    }

    /// Closest entry by exact scan under `metric`, bypassing the cache.
    pub fn find_closest_direct(&self, rgb: Rgb, metric: DistanceMetric) -> &PaletteEntry {
        self.palette.entry(self.direct_position(rgb, metric))
    }

    /// Declaration position of the exact-scan match.
    #[inline]
    pub fn direct_position(&self, rgb: Rgb, metric: DistanceMetric) -> usize {
        self.palette.find_nearest(Lab::from(rgb), metric).0
    }
}
