//! Fused density/thickness scorecard
//!
//! The two detectors count objects independently and rarely agree on how many
//! hairs an image holds. The density model is taken as the ground truth for
//! the hair count; the thickness model only contributes the proportion of
//! strong, medium and weak shafts, which is rescaled onto that count before any
//! index is derived.

use super::density::FollicularMetrics;
use super::thickness::ThicknessMetrics;
use hairscan_core::band::{
    EHD_PERCENT_BANDS, HAIR_CALIBER_INDEX_PCT_BANDS, HAIRS_PER_CM2_BANDS,
    OVERALL_HAIR_SCORE_BANDS, PERCENT_THICK_HAIRS_BANDS, TERMINAL_TO_VELLUS_RATIO_BANDS,
};
use hairscan_core::constants::{
    MAX_EFFECTIVE_HAIR_DENSITY, MEDIUM_WEIGHT, REFERENCE_AREA_CM2, STRONG_WEIGHT, WEAK_WEIGHT,
};
use hairscan_core::{Band, BandThresholds, round_to};
use serde::{Deserialize, Serialize};

/// Full-precision fused scores. Every ratio is 0.0 when its denominator is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedScores {
    pub effective_strong: f64,
    pub effective_medium: f64,
    pub effective_weak: f64,
    pub terminal_to_vellus_ratio: f64,
    pub percent_thick_hairs: f64,
    pub hair_caliber_index: u64,
    pub hair_caliber_index_pct: f64,
    pub avg_thickness_score: f64,
    pub hairs_per_fu: f64,
    pub hairs_per_cm2: f64,
    pub effective_hair_density: f64,
    pub ehd_percent: f64,
    pub overall_hair_score: f64,
}

impl CombinedScores {
    pub fn calculate(follicular: &FollicularMetrics, thickness: &ThicknessMetrics) -> Self {
        let total_hairs = follicular.total_hairs as f64;

        let (strong, medium, weak) =
            if thickness.total_detections == 0 || follicular.total_hairs == 0 {
                (0.0, 0.0, 0.0)
            } else {
                let total = thickness.total_detections as f64;
                let rescale = |count: usize| (count as f64 / total) * total_hairs;
                (
                    rescale(thickness.strong_count),
                    rescale(thickness.medium_count),
                    rescale(thickness.weak_count),
                )
            };
        let total_effective = strong + medium + weak;

        let terminal_to_vellus_ratio = ratio(weak, strong) * 100.0;
        let percent_thick_hairs = ratio(strong, total_effective) * 100.0;

        // Truncation, not rounding: the bands were calibrated on the truncated index.
        let hair_caliber_index =
            (strong * STRONG_WEIGHT + medium * MEDIUM_WEIGHT + weak * WEAK_WEIGHT) as u64;
        let hair_caliber_index_pct =
            ratio(hair_caliber_index as f64, total_hairs * STRONG_WEIGHT) * 100.0;
        let avg_thickness_score = ratio(hair_caliber_index as f64, total_effective);

        let hairs_per_fu = ratio(total_hairs, follicular.total_units as f64);
        let hairs_per_cm2 = total_hairs / REFERENCE_AREA_CM2;
        let effective_hair_density = hairs_per_cm2 * avg_thickness_score / STRONG_WEIGHT;
        let ehd_percent = effective_hair_density / MAX_EFFECTIVE_HAIR_DENSITY * 100.0;

        let overall_hair_score =
            harmonic_mean(hair_caliber_index_pct / 100.0, ehd_percent / 100.0) * 100.0;

        Self {
            effective_strong: strong,
            effective_medium: medium,
            effective_weak: weak,
            terminal_to_vellus_ratio,
            percent_thick_hairs,
            hair_caliber_index,
            hair_caliber_index_pct,
            avg_thickness_score,
            hairs_per_fu,
            hairs_per_cm2,
            effective_hair_density,
            ehd_percent,
            overall_hair_score,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Harmonic mean of two positive values, 0.0 if either is not positive.
pub fn harmonic_mean(a: f64, b: f64) -> f64 {
    if a > 0.0 && b > 0.0 {
        2.0 * a * b / (a + b)
    } else {
        0.0
    }
}

/// A displayed value and its qualitative band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandedValue {
    pub value: f64,
    pub band: Band,
}

impl BandedValue {
    /// Round for display, then band the number the user actually sees.
    fn new(value: f64, decimals: u32, thresholds: &BandThresholds) -> Self {
        let value = round_to(value, decimals);
        Self {
            value,
            band: thresholds.classify(value),
        }
    }
}

/// Scorecard for one image, rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedMetrics {
    pub effective_strong: f64,
    pub effective_medium: f64,
    pub effective_weak: f64,
    pub overall_hair_score: BandedValue,
    pub hair_caliber_index: u64,
    pub hair_caliber_index_pct: BandedValue,
    pub avg_thickness_score: f64,
    pub hairs_per_fu: f64,
    pub hairs_per_cm2: BandedValue,
    pub effective_hair_density: f64,
    pub ehd_percent: BandedValue,
    pub terminal_to_vellus_ratio: BandedValue,
    pub percent_thick_hairs: BandedValue,
}

impl From<&CombinedScores> for CombinedMetrics {
    fn from(scores: &CombinedScores) -> Self {
        Self {
            effective_strong: round_to(scores.effective_strong, 2),
            effective_medium: round_to(scores.effective_medium, 2),
            effective_weak: round_to(scores.effective_weak, 2),
            overall_hair_score: BandedValue::new(
                scores.overall_hair_score,
                1,
                &OVERALL_HAIR_SCORE_BANDS,
            ),
            hair_caliber_index: scores.hair_caliber_index,
            hair_caliber_index_pct: BandedValue::new(
                scores.hair_caliber_index_pct,
                1,
                &HAIR_CALIBER_INDEX_PCT_BANDS,
            ),
            avg_thickness_score: round_to(scores.avg_thickness_score, 2),
            hairs_per_fu: round_to(scores.hairs_per_fu, 2),
            hairs_per_cm2: BandedValue::new(scores.hairs_per_cm2, 1, &HAIRS_PER_CM2_BANDS),
            effective_hair_density: round_to(scores.effective_hair_density, 2),
            ehd_percent: BandedValue::new(scores.ehd_percent, 1, &EHD_PERCENT_BANDS),
            terminal_to_vellus_ratio: BandedValue::new(
                scores.terminal_to_vellus_ratio,
                1,
                &TERMINAL_TO_VELLUS_RATIO_BANDS,
            ),
            percent_thick_hairs: BandedValue::new(
                scores.percent_thick_hairs,
                1,
                &PERCENT_THICK_HAIRS_BANDS,
            ),
        }
    }
}

/// Fuse unrounded follicular metrics with raw thickness counts into a scorecard.
pub fn calculate_combined_metrics(
    follicular: &FollicularMetrics,
    thickness: &ThicknessMetrics,
) -> CombinedMetrics {
    CombinedMetrics::from(&CombinedScores::calculate(follicular, thickness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn follicular(total_units: usize, total_hairs: usize) -> FollicularMetrics {
        FollicularMetrics {
            total_units,
            total_hairs,
            density_per_cm2: total_units as f64 / REFERENCE_AREA_CM2,
            avg_hairs_per_unit: if total_units > 0 {
                total_hairs as f64 / total_units as f64
            } else {
                0.0
            },
            units_with_one_hair: 0,
            units_with_multiple_hairs: total_units,
            reference_area_cm2: REFERENCE_AREA_CM2,
            class_distribution: BTreeMap::new(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_matching_totals_rescale_is_noop() {
        let scores = CombinedScores::calculate(
            &follicular(25, 35),
            &ThicknessMetrics::from_counts(15, 12, 8),
        );

        assert_eq!(scores.effective_strong, 15.0);
        assert_eq!(scores.effective_medium, 12.0);
        assert_eq!(scores.effective_weak, 8.0);
        assert_eq!(scores.hair_caliber_index, 71);
        assert_close(scores.hair_caliber_index_pct, 71.0 / 105.0 * 100.0);
        assert_close(scores.avg_thickness_score, 71.0 / 35.0);
        assert_close(scores.terminal_to_vellus_ratio, 8.0 / 15.0 * 100.0);
        assert_close(scores.percent_thick_hairs, 15.0 / 35.0 * 100.0);
        assert_close(scores.hairs_per_fu, 1.4);
        assert_close(scores.hairs_per_cm2, 35.0 / 0.273);

        let ehd = 35.0 / 0.273 * (71.0 / 35.0) / 3.0;
        assert_close(scores.effective_hair_density, ehd);
        assert_close(scores.ehd_percent, ehd / 220.0 * 100.0);

        let a = 71.0 / 105.0;
        let b = ehd / 220.0;
        assert_close(scores.overall_hair_score, 2.0 * a * b / (a + b) * 100.0);
    }

    #[test]
    fn test_rescale_follows_density_hair_count() {
        let scores = CombinedScores::calculate(
            &follicular(40, 60),
            &ThicknessMetrics::from_counts(10, 5, 5),
        );

        assert_close(scores.effective_strong, 30.0);
        assert_close(scores.effective_medium, 15.0);
        assert_close(scores.effective_weak, 15.0);
        assert_close(
            scores.effective_strong + scores.effective_medium + scores.effective_weak,
            60.0,
        );
        assert_eq!(scores.hair_caliber_index, 127);
    }

    #[test]
    fn test_share_rescale_truncates_float_sum() {
        // 7/3 * 3 + 14/3 * 1.5 lands just below 14 in floating point.
        let scores = CombinedScores::calculate(
            &follicular(5, 7),
            &ThicknessMetrics::from_counts(1, 2, 0),
        );
        assert_eq!(scores.effective_strong, (1.0 / 3.0) * 7.0);
        assert_eq!(scores.effective_medium, (2.0 / 3.0) * 7.0);
        assert_eq!(scores.hair_caliber_index, 13);
    }

    #[test]
    fn test_caliber_index_truncates() {
        let scores = CombinedScores::calculate(
            &follicular(3, 3),
            &ThicknessMetrics::from_counts(0, 1, 2),
        );
        // 1 * 1.5 + 2 * 1.0 = 3.5
        assert_eq!(scores.hair_caliber_index, 3);
    }

    #[test]
    fn test_empty_thickness_yields_zero_scores() {
        let metrics =
            calculate_combined_metrics(&follicular(10, 14), &ThicknessMetrics::default());

        assert_eq!(metrics.effective_hair_density, 0.0);
        assert_eq!(metrics.overall_hair_score.value, 0.0);
        assert_eq!(metrics.overall_hair_score.band, Band::Danger);
        assert_eq!(metrics.hair_caliber_index, 0);
        assert_eq!(metrics.avg_thickness_score, 0.0);
        assert_eq!(metrics.terminal_to_vellus_ratio.value, 0.0);
        assert_eq!(metrics.hairs_per_fu, 1.4);
        assert!(metrics.hairs_per_cm2.value > 0.0);
    }

    #[test]
    fn test_empty_everything_is_finite() {
        let scores =
            CombinedScores::calculate(&follicular(0, 0), &ThicknessMetrics::from_counts(4, 2, 1));
        for value in [
            scores.terminal_to_vellus_ratio,
            scores.percent_thick_hairs,
            scores.hair_caliber_index_pct,
            scores.avg_thickness_score,
            scores.hairs_per_fu,
            scores.hairs_per_cm2,
            scores.effective_hair_density,
            scores.ehd_percent,
            scores.overall_hair_score,
        ] {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_no_strong_hairs() {
        let scores = CombinedScores::calculate(
            &follicular(20, 30),
            &ThicknessMetrics::from_counts(0, 7, 9),
        );
        assert_eq!(scores.terminal_to_vellus_ratio, 0.0);
        assert_eq!(scores.percent_thick_hairs, 0.0);
        assert!(scores.overall_hair_score > 0.0);
    }

    #[test]
    fn test_harmonic_mean_short_circuits() {
        assert_eq!(harmonic_mean(0.0, 0.8), 0.0);
        assert_eq!(harmonic_mean(0.5, 0.0), 0.0);
        assert_close(harmonic_mean(0.5, 0.5), 0.5);
    }

    #[test]
    fn test_scorecard_rounding_and_bands() {
        let metrics = calculate_combined_metrics(
            &follicular(25, 35),
            &ThicknessMetrics::from_counts(15, 12, 8),
        );

        assert_eq!(metrics.hair_caliber_index, 71);
        assert_eq!(metrics.hair_caliber_index_pct.value, 67.6);
        assert_eq!(metrics.hair_caliber_index_pct.band, Band::Warning);
        assert_eq!(metrics.percent_thick_hairs.value, 42.9);
        assert_eq!(metrics.percent_thick_hairs.band, Band::Warning);
        assert_eq!(metrics.terminal_to_vellus_ratio.value, 53.3);
        assert_eq!(metrics.terminal_to_vellus_ratio.band, Band::Danger);
        assert_eq!(metrics.hairs_per_cm2.value, 128.2);
        assert_eq!(metrics.hairs_per_cm2.band, Band::Warning);
        assert_eq!(metrics.ehd_percent.value, 39.4);
        assert_eq!(metrics.ehd_percent.band, Band::Danger);
        assert_eq!(metrics.overall_hair_score.value, 49.8);
        assert_eq!(metrics.overall_hair_score.band, Band::Danger);
    }
}
