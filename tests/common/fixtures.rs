//! Test fixtures: synthetic sprites, PNG files and configs.

use std::path::{Path, PathBuf};

use eink_quantize::{Rgb, RgbImage};
use pokeink::rendering::encode_rgb_png;
use tempfile::TempDir;

/// Config for the 7-color panel
pub const SEVEN_COLOR_YAML: &str = r#"
display:
  type: 7in3e
image_processing:
  dithering_algorithm: floyd_steinberg_7color
"#;

/// Config for the HD monochrome panel with enhancement disabled
pub const MONO_RAW_YAML: &str = r#"
display:
  type: 7in5_HD
image_processing:
  dithering_algorithm: floyd_steinberg
  enhance: false
"#;

/// Sprite-like test image: white background with a colored disc and a
/// grey gradient band.
pub fn sprite(width: usize, height: usize) -> RgbImage {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 / 3.0;
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = ((i % width) as f64, (i / width) as f64);
            if ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() < radius {
                Rgb::new(230, (x * 255.0 / width as f64) as u8, 40)
            } else if y < 4.0 {
                let v = (x * 255.0 / width as f64) as u8;
                Rgb::new(v, v, v)
            } else {
                Rgb::WHITE
            }
        })
        .collect();
    RgbImage::new(width, height, pixels).unwrap()
}

/// Temporary directory holding files written by a test
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write an image as a truecolor PNG and return its path
    pub fn write_png(&self, name: &str, image: &RgbImage) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, encode_rgb_png(image).unwrap()).unwrap();
        path
    }

    /// Write a config file and return its path
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.path("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }
}

/// Read a file to bytes
pub fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}
