//! Precomputed bucket grid of nearest palette positions.

use std::time::Instant;

use crate::api::QuantizeError;
use crate::color::{Lab, Rgb};
use crate::palette::{DistanceMetric, Palette};

/// Nearest palette position for every bucket of a quantized RGB cube.
///
/// A color falls into the bucket whose corner is each channel rounded down
/// to a multiple of `step`. The stored answer is the direct nearest match
/// of that corner, so cached answers are exact on grid-aligned colors and
/// otherwise off by at most the corner-to-color distance.
///
/// The cache is immutable once built and meant to be shared by reference
/// or `Arc` between matchers and threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCache {
    step: u8,
    /// Buckets per channel.
    side: usize,
    /// Palette size the cache was built for.
    palette_len: usize,
    positions: Vec<u8>,
}

impl LookupCache {
    /// Default bucket width in 8-bit channel units.
    pub const DEFAULT_STEP: u8 = 4;

    /// Build the full grid for `palette`.
    ///
    /// Every bucket corner over 0..=255 is converted to L\*a\*b\* and matched
    /// against the palette with `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::InvalidCacheStep`] when `step` is 0.
    pub fn build(palette: &Palette, step: u8, metric: DistanceMetric) -> Result<Self, QuantizeError> {
        if step == 0 {
            return Err(QuantizeError::InvalidCacheStep { step });
        }

        let start = Instant::now();
        let side = 255 / step as usize + 1;
        let mut positions = Vec::with_capacity(side * side * side);

        for ri in 0..side {
            for gi in 0..side {
                for bi in 0..side {
                    let corner = Rgb::new(
                        (ri * step as usize) as u8,
                        (gi * step as usize) as u8,
                        (bi * step as usize) as u8,
                    );
                    let (position, _) = palette.find_nearest(Lab::from(corner), metric);
                    positions.push(position as u8);
                }
            }
        }

        tracing::debug!(
            step,
            buckets = positions.len(),
            colors = palette.len(),
            %metric,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built lookup cache"
        );

        Ok(Self {
            step,
            side,
            palette_len: palette.len(),
            positions,
        })
    }

    /// Bucket width.
    #[inline]
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Number of buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the grid is empty; never true for a built cache.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Size of the palette this cache answers for.
    #[inline]
    pub fn palette_len(&self) -> usize {
        self.palette_len
    }

    /// Corner of the bucket containing `rgb`.
    #[inline]
    pub fn bucket_corner(&self, rgb: Rgb) -> Rgb {
        let s = self.step;
        Rgb::new(rgb.r / s * s, rgb.g / s * s, rgb.b / s * s)
    }

    /// Cached palette position for `rgb`, if its bucket is present.
    #[inline]
    pub fn lookup(&self, rgb: Rgb) -> Option<usize> {
        let s = self.step as usize;
        let (r, g, b) = (rgb.r as usize / s, rgb.g as usize / s, rgb.b as usize / s);
        self.positions
            .get((r * self.side + g) * self.side + b)
            .map(|&p| p as usize)
    }

    /// Cached position, or the direct simplified-CIEDE2000 match on a miss.
    #[inline]
    pub fn lookup_or_compute(&self, rgb: Rgb, palette: &Palette) -> usize {
        match self.lookup(rgb) {
            Some(position) => position,
            // Only a truncated grid misses; `build` fills every bucket
            None => {
                palette
                    .find_nearest(Lab::from(rgb), DistanceMetric::Ciede2000Simplified)
                    .0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size() {
        let palette = Palette::monochrome();
        let cache = LookupCache::build(&palette, 4, DistanceMetric::default()).unwrap();
        assert_eq!(cache.len(), 64 * 64 * 64);
        assert_eq!(cache.step(), 4);

        let coarse = LookupCache::build(&palette, 100, DistanceMetric::default()).unwrap();
        // Corners 0, 100, 200
        assert_eq!(coarse.len(), 27);

        let fine = LookupCache::build(&palette, 255, DistanceMetric::default()).unwrap();
        assert_eq!(fine.len(), 8);
    }

    #[test]
    fn test_zero_step_rejected() {
        let result = LookupCache::build(&Palette::monochrome(), 0, DistanceMetric::default());
        assert_eq!(result, Err(QuantizeError::InvalidCacheStep { step: 0 }));
    }

    #[test]
    fn test_bucket_corner() {
        let cache = LookupCache::build(&Palette::monochrome(), 4, DistanceMetric::default()).unwrap();
        assert_eq!(cache.bucket_corner(Rgb::new(7, 8, 255)), Rgb::new(4, 8, 252));
        assert_eq!(cache.bucket_corner(Rgb::new(0, 3, 4)), Rgb::new(0, 0, 4));
    }

    #[test]
    fn test_every_channel_value_hits_the_grid() {
        for step in [1u8, 3, 4, 7, 16, 128] {
            let cache = LookupCache::build(&Palette::monochrome(), step, DistanceMetric::default()).unwrap();
            for v in 0..=255u8 {
                assert!(cache.lookup(Rgb::new(v, v, v)).is_some(), "step {step}, value {v}");
            }
        }
    }

    #[test]
    fn test_lookup_matches_corner() {
        let palette = Palette::seven_color();
        let metric = DistanceMetric::default();
        let cache = LookupCache::build(&palette, 8, metric).unwrap();
        for rgb in [Rgb::new(13, 200, 99), Rgb::new(255, 170, 3), Rgb::new(64, 64, 64)] {
            let corner = cache.bucket_corner(rgb);
            let direct = palette.find_nearest(Lab::from(corner), metric).0;
            assert_eq!(cache.lookup_or_compute(rgb, &palette), direct);
        }
    }

    #[test]
    fn test_truncated_grid_falls_back_to_direct_match() {
        let palette = Palette::seven_color();
        let cache = LookupCache {
            step: 4,
            side: 64,
            palette_len: palette.len(),
            positions: Vec::new(),
        };
        let rgb = Rgb::new(250, 20, 30);
        assert_eq!(cache.lookup(rgb), None);

        let direct = palette
            .find_nearest(Lab::from(rgb), DistanceMetric::Ciede2000Simplified)
            .0;
        assert_eq!(cache.lookup_or_compute(rgb, &palette), direct);
        assert_eq!(palette.entries()[direct].name(), "RED");
    }
}
