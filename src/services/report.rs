use eink_quantize::{analyze_colors, ColorMatcher, RgbImage};
use serde::Serialize;

/// Color frequency report for `pokeink analyze`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub width: usize,
    pub height: usize,
    pub top_colors: Vec<ColorReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColorReport {
    /// "#RRGGBB"
    pub color: String,
    pub count: usize,
    pub percent: f64,
    /// Palette entry the color maps to
    pub nearest: String,
}

impl AnalysisReport {
    pub fn build(image: &RgbImage, top_n: usize, matcher: &ColorMatcher) -> Self {
        let total = image.pixels().len() as f64;
        let top_colors = analyze_colors(image, top_n)
            .into_iter()
            .map(|c| ColorReport {
                color: c.color.to_string(),
                count: c.count,
                percent: (c.count as f64 * 10_000.0 / total).round() / 100.0,
                nearest: matcher.find_closest(c.color).name().to_string(),
            })
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            top_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eink_quantize::{Palette, Rgb};
    use std::sync::Arc;

    #[test]
    fn test_report() {
        let mut pixels = vec![Rgb::new(250, 10, 10); 3];
        pixels.push(Rgb::new(5, 5, 5));
        let image = RgbImage::new(2, 2, pixels).unwrap();
        let matcher = ColorMatcher::new(Arc::new(Palette::seven_color()), 4).unwrap();

        let report = AnalysisReport::build(&image, 5, &matcher);
        assert_eq!(report.width, 2);
        assert_eq!(report.top_colors.len(), 2);
        assert_eq!(report.top_colors[0].color, "#FA0A0A");
        assert_eq!(report.top_colors[0].count, 3);
        assert_eq!(report.top_colors[0].percent, 75.0);
        assert_eq!(report.top_colors[0].nearest, "RED");
        assert_eq!(report.top_colors[1].nearest, "BLACK");
    }

    #[test]
    fn test_report_serializes() {
        let image = RgbImage::filled(1, 1, Rgb::WHITE).unwrap();
        let matcher = ColorMatcher::new(Arc::new(Palette::monochrome()), 4).unwrap();
        let json = serde_json::to_value(AnalysisReport::build(&image, 1, &matcher)).unwrap();
        assert_eq!(json["top_colors"][0]["color"], "#FFFFFF");
        assert_eq!(json["top_colors"][0]["nearest"], "WHITE");
    }
}
