use std::fmt;
use std::str::FromStr;

use eink_quantize::{Enhancement, Palette, UnknownVariant};
use serde::{Deserialize, Serialize};

/// Which preset palette a panel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    #[serde(rename = "monochrome")]
    Monochrome,
    #[serde(rename = "7color")]
    SevenColor,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "monochrome",
            ColorMode::SevenColor => "7color",
        }
    }

    /// Preset palette for this mode.
    pub fn palette(self) -> Palette {
        match self {
            ColorMode::Monochrome => Palette::monochrome(),
            ColorMode::SevenColor => Palette::seven_color(),
        }
    }

    /// Enhancement applied before dithering in this mode.
    pub fn enhancement(self) -> Enhancement {
        match self {
            ColorMode::Monochrome => Enhancement::monochrome(),
            ColorMode::SevenColor => Enhancement::vibrant(),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monochrome" | "mono" | "bw" => Ok(ColorMode::Monochrome),
            "7color" | "seven_color" | "color" => Ok(ColorMode::SevenColor),
            _ => Err(UnknownVariant::new("color mode", s)),
        }
    }
}

/// Panel geometry and color capability for supported Waveshare displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySpec {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
}

impl DisplaySpec {
    /// 7.3" 7-color panel: 800x480
    pub const EPD_7IN3E: Self = Self {
        name: "7in3e",
        width: 800,
        height: 480,
        color_mode: ColorMode::SevenColor,
    };

    /// 7.5" HD monochrome panel: 880x528
    pub const EPD_7IN5_HD: Self = Self {
        name: "7in5_HD",
        width: 880,
        height: 528,
        color_mode: ColorMode::Monochrome,
    };

    /// 7.5" V2 monochrome panel: 800x480
    pub const EPD_7IN5_V2: Self = Self {
        name: "7in5_V2",
        width: 800,
        height: 480,
        color_mode: ColorMode::Monochrome,
    };

    pub const ALL: [Self; 3] = [Self::EPD_7IN3E, Self::EPD_7IN5_HD, Self::EPD_7IN5_V2];

    /// Look up a known panel by its config name.
    pub fn from_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|spec| spec.name == name)
    }

    /// Resolve the panel for a config entry.
    ///
    /// Known panels force their own color mode. Unknown names fall back to
    /// the HD geometry and keep the configured mode.
    pub fn resolve(name: &str, configured_mode: ColorMode) -> Self {
        match Self::from_type(name) {
            Some(spec) => {
                if spec.color_mode != configured_mode {
                    tracing::debug!(
                        display = spec.name,
                        configured = %configured_mode,
                        forced = %spec.color_mode,
                        "Display type overrides color mode"
                    );
                }
                spec
            }
            None => {
                tracing::warn!(display = name, "Unknown display type, using 7in5_HD geometry");
                Self {
                    color_mode: configured_mode,
                    ..Self::EPD_7IN5_HD
                }
            }
        }
    }

    /// Whether an image of the given size fits on the panel.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(DisplaySpec::from_type("7in3e"), Some(DisplaySpec::EPD_7IN3E));
        assert_eq!(DisplaySpec::from_type("7in5_HD").map(|s| s.width), Some(880));
        assert_eq!(DisplaySpec::from_type("7in5_V2").map(|s| s.height), Some(480));
        assert_eq!(DisplaySpec::from_type("13in3"), None);
    }

    #[test]
    fn test_known_type_forces_mode() {
        let spec = DisplaySpec::resolve("7in3e", ColorMode::Monochrome);
        assert_eq!(spec.color_mode, ColorMode::SevenColor);

        let spec = DisplaySpec::resolve("7in5_V2", ColorMode::SevenColor);
        assert_eq!(spec.color_mode, ColorMode::Monochrome);
    }

    #[test]
    fn test_unknown_type_keeps_mode() {
        let spec = DisplaySpec::resolve("custom", ColorMode::SevenColor);
        assert_eq!(spec.color_mode, ColorMode::SevenColor);
        assert_eq!((spec.width, spec.height), (880, 528));
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("7color".parse::<ColorMode>().unwrap(), ColorMode::SevenColor);
        assert_eq!("Monochrome".parse::<ColorMode>().unwrap(), ColorMode::Monochrome);
        assert!("sepia".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_color_mode_palette() {
        assert_eq!(ColorMode::SevenColor.palette().len(), 7);
        assert_eq!(ColorMode::Monochrome.palette().len(), 2);
    }

    #[test]
    fn test_fits() {
        assert!(DisplaySpec::EPD_7IN3E.fits(800, 480));
        assert!(!DisplaySpec::EPD_7IN3E.fits(801, 10));
    }
}
