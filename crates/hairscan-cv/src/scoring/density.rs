//! Follicular-unit metrics from the density model

use crate::bbox::DetectionSet;
use hairscan_core::constants::{DENSITY_CONFIDENCE_FLOOR, REFERENCE_AREA_CM2};
use hairscan_core::label::hair_count;
use hairscan_core::round_to;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Follicular-unit statistics for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollicularMetrics {
    pub total_units: usize,
    pub total_hairs: usize,
    pub density_per_cm2: f64,
    pub avg_hairs_per_unit: f64,
    pub units_with_one_hair: usize,
    pub units_with_multiple_hairs: usize,
    pub reference_area_cm2: f64,
    /// Hairs per unit -> number of units
    pub class_distribution: BTreeMap<u32, usize>,
}

impl FollicularMetrics {
    /// Copy with derived ratios rounded to 2 decimals for display.
    ///
    /// Fusion with the thickness model must use the unrounded metrics.
    pub fn rounded(&self) -> Self {
        Self {
            density_per_cm2: round_to(self.density_per_cm2, 2),
            avg_hairs_per_unit: round_to(self.avg_hairs_per_unit, 2),
            ..self.clone()
        }
    }
}

/// Count follicular units and hairs in a suppressed density detection set.
pub fn calculate_follicular_metrics(detections: &DetectionSet) -> FollicularMetrics {
    let mut class_distribution: BTreeMap<u32, usize> = BTreeMap::new();
    let mut total_units = 0usize;
    let mut total_hairs = 0usize;

    for detection in detections
        .iter()
        .filter(|d| d.confidence >= DENSITY_CONFIDENCE_FLOOR)
    {
        let hairs = hair_count(&detection.label);
        total_units += 1;
        total_hairs += hairs as usize;
        *class_distribution.entry(hairs).or_insert(0) += 1;
    }

    let units_with_one_hair = class_distribution.get(&1).copied().unwrap_or(0);
    let avg_hairs_per_unit = if total_units > 0 {
        total_hairs as f64 / total_units as f64
    } else {
        0.0
    };

    FollicularMetrics {
        total_units,
        total_hairs,
        density_per_cm2: total_units as f64 / REFERENCE_AREA_CM2,
        avg_hairs_per_unit,
        units_with_one_hair,
        units_with_multiple_hairs: total_units - units_with_one_hair,
        reference_area_cm2: REFERENCE_AREA_CM2,
        class_distribution,
    }
}
