//! Hairscan detection post-processing
//!
//! Turns the raw, overlapping output of the follicular-unit (density) and
//! hair-shaft (thickness) detectors into clean detection sets and a banded
//! hair-health scorecard. Everything here is a pure function of its inputs.

pub mod bbox;
pub mod detection;
pub mod error;
pub mod scoring;
pub mod utils;

// Re-export commonly used types
pub use bbox::{BBox, Detection, DetectionSet};
pub use detection::{AnalysisConfig, AnalysisReport, HairAnalyzer, ImageDetections, NmsConfig};
pub use error::{ConfigError, PayloadError};
pub use scoring::{CombinedMetrics, FollicularMetrics, ThicknessMetrics};
pub use utils::PriorityNms;

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the post-processing pipeline
pub mod traits {
    use super::*;

    /// Trait for non-maximum suppression implementations
    pub trait NonMaxSuppression {
        fn suppress(&self, detections: DetectionSet) -> DetectionSet;
    }
}
