//! Seeded two-color random dithering (experimental).
//!
//! Each pixel picks between its two perceptually nearest entries: the
//! nearest with probability [`NEAREST_BIAS`], otherwise the runner-up.
//! Thresholds come from a seeded generator drawn once per pixel in
//! row-major order, so output is reproducible for a given seed and image.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{Lab, Rgb};
use crate::image::RgbImage;
use crate::palette::{DistanceMetric, Palette};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Probability of choosing the nearest entry over the second nearest.
pub const NEAREST_BIAS: f64 = 0.7;

/// Quantize `image` by random choice between the two nearest entries.
///
/// Ranking uses the direct simplified-CIEDE2000 distance. Equal distances
/// keep palette declaration order, not name order, so reordering the
/// palette can change which of two equidistant entries counts as nearest.
pub fn dither_blue_noise(image: &RgbImage, palette: &Palette, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs: HashMap<Rgb, (usize, usize)> = HashMap::new();

    image
        .pixels()
        .iter()
        .map(|&p| {
            let (nearest, second) = *pairs.entry(p).or_insert_with(|| {
                palette.two_nearest(Lab::from(p), DistanceMetric::Ciede2000Simplified)
            });
            let threshold: f64 = rng.gen();
            if threshold < NEAREST_BIAS {
                nearest as u8
            } else {
                second as u8
            }
        })
        .collect()
}
