//! High-level detection post-processing

pub mod analyzer;
pub mod config;
pub mod payload;

pub use analyzer::{AnalysisReport, DensityResults, HairAnalyzer, ImageDetections, ThicknessResults};
pub use config::{AnalysisConfig, ModelConfig, NmsConfig};
pub use payload::normalize_payload;
