pub mod config;
pub mod display_spec;

pub use config::{AppConfig, DisplayConfig, ImageProcessingConfig, PaletteColorConfig};
pub use display_spec::{ColorMode, DisplaySpec};
