pub mod report;
pub mod sprite_processor;

pub use report::{AnalysisReport, ColorReport};
pub use sprite_processor::{usage_summary, SpriteProcessor};
