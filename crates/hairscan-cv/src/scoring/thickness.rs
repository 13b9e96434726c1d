//! Shaft caliber counts from the thickness model

use crate::bbox::DetectionSet;
use hairscan_core::ThicknessClass;
use serde::{Deserialize, Serialize};

/// Raw strong/medium/weak counts before calibration against the density model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThicknessMetrics {
    pub strong_count: usize,
    pub medium_count: usize,
    pub weak_count: usize,
    /// Sum of the three classes; unrecognized labels are not part of it.
    pub total_detections: usize,
}

impl ThicknessMetrics {
    pub fn from_counts(strong: usize, medium: usize, weak: usize) -> Self {
        Self {
            strong_count: strong,
            medium_count: medium,
            weak_count: weak,
            total_detections: strong + medium + weak,
        }
    }

    pub fn count(&self, class: ThicknessClass) -> usize {
        match class {
            ThicknessClass::Strong => self.strong_count,
            ThicknessClass::Medium => self.medium_count,
            ThicknessClass::Weak => self.weak_count,
        }
    }
}

/// Tally caliber classes in a suppressed thickness detection set.
pub fn calculate_thickness_metrics(detections: &DetectionSet) -> ThicknessMetrics {
    let (mut strong, mut medium, mut weak) = (0, 0, 0);
    for detection in detections {
        match ThicknessClass::from_label(&detection.label) {
            Some(ThicknessClass::Strong) => strong += 1,
            Some(ThicknessClass::Medium) => medium += 1,
            Some(ThicknessClass::Weak) => weak += 1,
            None => {}
        }
    }
    ThicknessMetrics::from_counts(strong, medium, weak)
}
