//! Biometric scoring of suppressed detections

pub mod combined;
pub mod density;
pub mod thickness;

pub use combined::{BandedValue, CombinedMetrics, CombinedScores, calculate_combined_metrics};
pub use density::{FollicularMetrics, calculate_follicular_metrics};
pub use thickness::{ThicknessMetrics, calculate_thickness_metrics};
