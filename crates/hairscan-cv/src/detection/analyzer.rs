//! High-level scalp image analyzer
//!
//! Runs each model's raw detections through confidence filtering and
//! priority NMS, scores them, and fuses both into one report.

use super::config::{AnalysisConfig, ModelConfig};
use crate::bbox::DetectionSet;
use crate::scoring::{
    CombinedMetrics, FollicularMetrics, ThicknessMetrics, calculate_combined_metrics,
    calculate_follicular_metrics, calculate_thickness_metrics,
};
use crate::traits::NonMaxSuppression;
use crate::utils::PriorityNms;
use crate::Result;
use anyhow::Context;
use hairscan_core::LabelScheme;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw detections of both models for a single photograph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageDetections {
    pub density: DetectionSet,
    pub thickness: DetectionSet,
}

/// Density model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityResults {
    pub detections: DetectionSet,
    pub follicular_metrics: FollicularMetrics,
    pub class_counts: BTreeMap<String, usize>,
    pub total_predictions: usize,
}

/// Thickness model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThicknessResults {
    pub detections: DetectionSet,
    pub thickness_metrics: ThicknessMetrics,
    pub class_counts: BTreeMap<String, usize>,
    pub total_predictions: usize,
}

/// Complete analysis of one photograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub density_results: DensityResults,
    pub thickness_results: ThicknessResults,
    pub combined_metrics: CombinedMetrics,
    pub model_parameters: AnalysisConfig,
}

/// Main analyzer
#[derive(Debug, Clone)]
pub struct HairAnalyzer {
    config: AnalysisConfig,
}

impl HairAnalyzer {
    /// Create new analyzer
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid analysis configuration")?;
        Ok(Self { config })
    }

    /// Analyze one photograph from both models' raw detections
    pub fn analyze(&self, density: DetectionSet, thickness: DetectionSet) -> AnalysisReport {
        let density = postprocess(
            density,
            &self.config.density,
            AnalysisConfig::DENSITY_LABELS,
        );
        let thickness = postprocess(
            thickness,
            &self.config.thickness,
            AnalysisConfig::THICKNESS_LABELS,
        );

        let follicular = calculate_follicular_metrics(&density);
        let thickness_metrics = calculate_thickness_metrics(&thickness);
        let combined_metrics = calculate_combined_metrics(&follicular, &thickness_metrics);

        AnalysisReport {
            density_results: DensityResults {
                class_counts: density.class_counts(),
                total_predictions: density.len(),
                follicular_metrics: follicular.rounded(),
                detections: density,
            },
            thickness_results: ThicknessResults {
                class_counts: thickness.class_counts(),
                total_predictions: thickness.len(),
                thickness_metrics,
                detections: thickness,
            },
            combined_metrics,
            model_parameters: self.config,
        }
    }

    pub fn analyze_image(&self, image: &ImageDetections) -> AnalysisReport {
        self.analyze(image.density.clone(), image.thickness.clone())
    }

    /// Analyze many photographs; each one is independent of the others
    #[cfg(feature = "parallel")]
    pub fn analyze_batch(&self, images: &[ImageDetections]) -> Vec<AnalysisReport> {
        use rayon::prelude::*;
        images.par_iter().map(|image| self.analyze_image(image)).collect()
    }

    /// Analyze many photographs; each one is independent of the others
    #[cfg(not(feature = "parallel"))]
    pub fn analyze_batch(&self, images: &[ImageDetections]) -> Vec<AnalysisReport> {
        images.iter().map(|image| self.analyze_image(image)).collect()
    }
}

/// Confidence filter, suppression and annotation colours for one model.
fn postprocess(raw: DetectionSet, config: &ModelConfig, labels: LabelScheme) -> DetectionSet {
    let raw_len = raw.len();
    let filtered = raw.filter_by_confidence(config.confidence_threshold);
    debug!(
        "{:?}: {} of {} detections at confidence >= {}",
        labels,
        filtered.len(),
        raw_len,
        config.confidence_threshold
    );

    PriorityNms::new(config.nms, labels)
        .suppress(filtered)
        .into_iter()
        .map(|d| {
            let color = labels.annotation_color(&d.label);
            d.with_color(color)
        })
        .collect()
}
