use std::path::Path;

use eink_quantize::{Backend, DistanceMetric, DitherMethod, Palette, Rgb};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::display_spec::{ColorMode, DisplaySpec};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Target panel
    #[serde(default)]
    pub display: DisplayConfig,

    /// Quantizer and dithering settings
    #[serde(default)]
    pub image_processing: ImageProcessingConfig,

    /// Custom palette replacing the preset of the color mode
    #[serde(default)]
    pub palette: Option<Vec<PaletteColorConfig>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Panel name: "7in3e", "7in5_HD" or "7in5_V2"
    #[serde(rename = "type", default = "default_display_type")]
    pub display_type: String,

    /// Used only when the panel type does not force a mode
    #[serde(default)]
    pub color_mode: ColorMode,
}

fn default_display_type() -> String {
    DisplaySpec::EPD_7IN5_HD.name.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_type: default_display_type(),
            color_mode: ColorMode::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageProcessingConfig {
    #[serde(default = "default_algorithm")]
    pub dithering_algorithm: String,

    #[serde(default = "default_true")]
    pub serpentine: bool,

    #[serde(default = "default_cache_step")]
    pub cache_step: u8,

    /// "ciede2000" or "cie76"
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Blue-noise seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// "accelerated" or "reference"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Apply the color-mode enhancement before dithering
    #[serde(default = "default_true")]
    pub enhance: bool,
}

fn default_algorithm() -> String {
    "floyd_steinberg_7color".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cache_step() -> u8 {
    eink_quantize::LookupCache::DEFAULT_STEP
}

fn default_metric() -> String {
    DistanceMetric::default().as_str().to_string()
}

fn default_seed() -> u64 {
    eink_quantize::dither::blue_noise::DEFAULT_SEED
}

fn default_backend() -> String {
    "accelerated".to_string()
}

impl Default for ImageProcessingConfig {
    fn default() -> Self {
        Self {
            dithering_algorithm: default_algorithm(),
            serpentine: true,
            cache_step: default_cache_step(),
            metric: default_metric(),
            seed: default_seed(),
            backend: default_backend(),
            enhance: true,
        }
    }
}

impl ImageProcessingConfig {
    /// Dithering method; unknown names resolve to Floyd-Steinberg.
    pub fn method(&self) -> DitherMethod {
        DitherMethod::from_name_or_default(&self.dithering_algorithm)
    }

    pub fn metric(&self) -> Result<DistanceMetric, AppError> {
        Ok(self.metric.parse()?)
    }

    pub fn backend(&self) -> Result<Backend, AppError> {
        Ok(self.backend.parse()?)
    }
}

/// One custom palette entry
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PaletteColorConfig {
    pub name: String,
    /// Hex color, "#RRGGBB" or "#RGB"
    pub color: String,
    /// Driver wire index
    pub index: u8,
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        display = %config.display.display_type,
                        algorithm = %config.image_processing.dithering_algorithm,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolved target panel
    pub fn display_spec(&self) -> DisplaySpec {
        DisplaySpec::resolve(&self.display.display_type, self.display.color_mode)
    }

    /// Custom palette if configured, otherwise the preset for `mode`
    pub fn build_palette(&self, mode: ColorMode) -> Result<Palette, AppError> {
        let Some(colors) = &self.palette else {
            return Ok(mode.palette());
        };
        let entries = colors
            .iter()
            .map(|c| {
                c.color
                    .parse::<Rgb>()
                    .map(|rgb| (c.name.as_str(), rgb, c.index))
                    .map_err(|source| eink_quantize::PaletteError::ParseColor {
                        name: c.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Palette::new(entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.display.display_type, "7in5_HD");
        assert_eq!(config.display.color_mode, ColorMode::Monochrome);
        assert!(config.palette.is_none());

        let ip = &config.image_processing;
        assert_eq!(ip.method(), DitherMethod::FloydSteinberg);
        assert!(ip.serpentine);
        assert_eq!(ip.cache_step, 4);
        assert_eq!(ip.metric().unwrap(), DistanceMetric::Ciede2000Simplified);
        assert_eq!(ip.seed, 42);
        assert_eq!(ip.backend().unwrap(), Backend::Accelerated);
        assert!(ip.enhance);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
display:
  type: 7in3e
  color_mode: monochrome
image_processing:
  dithering_algorithm: jarvis_judice_ninke_7color
  serpentine: false
  cache_step: 8
  metric: cie76
  seed: 7
  backend: reference
  enhance: false
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.display_spec(), DisplaySpec::EPD_7IN3E);
        let ip = &config.image_processing;
        assert_eq!(ip.method(), DitherMethod::JarvisJudiceNinke);
        assert!(!ip.serpentine);
        assert_eq!(ip.cache_step, 8);
        assert_eq!(ip.metric().unwrap(), DistanceMetric::Cie76);
        assert_eq!(ip.seed, 7);
        assert_eq!(ip.backend().unwrap(), Backend::Reference);
        assert!(!ip.enhance);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_yaml("display:\n  color_mode: 7color\n").unwrap();
        assert_eq!(config.display.display_type, "7in5_HD");
        assert_eq!(config.display.color_mode, ColorMode::SevenColor);
        assert_eq!(config.image_processing.cache_step, 4);
    }

    #[test]
    fn test_unknown_algorithm_defaults_to_floyd_steinberg() {
        let config =
            AppConfig::from_yaml("image_processing:\n  dithering_algorithm: sierra\n").unwrap();
        assert_eq!(config.image_processing.method(), DitherMethod::FloydSteinberg);
    }

    #[test]
    fn test_unknown_metric_is_error() {
        let config = AppConfig::from_yaml("image_processing:\n  metric: cie94\n").unwrap();
        assert!(matches!(
            config.image_processing.metric(),
            Err(AppError::Setting(_))
        ));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(matches!(
            AppConfig::from_yaml("display: [unclosed"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load(Path::new("/nonexistent/pokeink.yaml"));
        assert_eq!(config.display.display_type, "7in5_HD");
    }

    #[test]
    fn test_custom_palette() {
        let yaml = r##"
palette:
  - { name: INK, color: "#000000", index: 0 }
  - { name: PAPER, color: "#FFF", index: 1 }
  - { name: ACCENT, color: "#C00000", index: 4 }
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();
        let palette = config.build_palette(ColorMode::Monochrome).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.wire_indices(), vec![0, 1, 4]);
        assert_eq!(palette.by_name("PAPER").unwrap().rgb(), Rgb::WHITE);
    }

    #[test]
    fn test_custom_palette_bad_color() {
        let yaml = "palette:\n  - { name: INK, color: \"#GG0000\", index: 0 }\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.build_palette(ColorMode::Monochrome),
            Err(AppError::Palette(_))
        ));
    }

    #[test]
    fn test_preset_palette_when_not_configured() {
        let config = AppConfig::default();
        let palette = config.build_palette(ColorMode::SevenColor).unwrap();
        assert_eq!(palette, Palette::seven_color());
    }
}
