//! Quantization without error diffusion.
//!
//! Every pixel is mapped on its own, so these are also the last resort
//! when no diffusion engine is wanted.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::image::RgbImage;
use crate::matcher::ColorMatcher;
use crate::palette::Palette;

/// Map each pixel to the entry with the least RGB Euclidean distance.
pub fn quantize_simple(image: &RgbImage, palette: &Palette) -> Vec<u8> {
    let mut memo: HashMap<Rgb, u8> = HashMap::new();
    image
        .pixels()
        .iter()
        .map(|&p| *memo.entry(p).or_insert_with(|| palette.nearest_rgb(p) as u8))
        .collect()
}

/// Map each pixel to its perceptually closest entry through the cache.
pub fn quantize_nearest(image: &RgbImage, matcher: &ColorMatcher) -> Vec<u8> {
    image
        .pixels()
        .iter()
        .map(|&p| matcher.closest_position(p) as u8)
        .collect()
}
