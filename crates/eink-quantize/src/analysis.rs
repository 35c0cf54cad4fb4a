//! Color frequency analysis.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::image::RgbImage;

/// A color and the number of pixels that have it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Rgb,
    pub count: usize,
}

/// The `top_n` most frequent colors, most frequent first.
///
/// Equal counts are ordered by ascending RGB value so the result does not
/// depend on hashing.
pub fn analyze_colors(image: &RgbImage, top_n: usize) -> Vec<ColorCount> {
    let mut counts: HashMap<Rgb, usize> = HashMap::new();
    for &p in image.pixels() {
        *counts.entry(p).or_default() += 1;
    }

    let mut ranked: Vec<ColorCount> = counts
        .into_iter()
        .map(|(color, count)| ColorCount { color, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.color.cmp(&b.color)));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let img = RgbImage::new(6, 1, vec![red, blue, red, Rgb::WHITE, blue, red]).unwrap();
        let top = analyze_colors(&img, 10);
        assert_eq!(
            top,
            vec![
                ColorCount { color: red, count: 3 },
                ColorCount { color: blue, count: 2 },
                ColorCount { color: Rgb::WHITE, count: 1 },
            ]
        );
    }

    #[test]
    fn test_ties_by_rgb() {
        let img = RgbImage::new(3, 1, vec![Rgb::WHITE, Rgb::new(5, 5, 5), Rgb::BLACK]).unwrap();
        let colors: Vec<Rgb> = analyze_colors(&img, 2).into_iter().map(|c| c.color).collect();
        assert_eq!(colors, vec![Rgb::BLACK, Rgb::new(5, 5, 5)]);
    }

    #[test]
    fn test_top_zero() {
        let img = RgbImage::filled(2, 2, Rgb::BLACK).unwrap();
        assert!(analyze_colors(&img, 0).is_empty());
    }
}
