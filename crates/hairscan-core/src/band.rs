//! Qualitative banding of scorecard values
//!
//! Every banded metric has two cut points. The thresholds below drive the
//! colour coding shown to users and are part of the scoring contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative grade attached to a scorecard value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::Success => "success",
            Band::Warning => "warning",
            Band::Danger => "danger",
        };
        f.write_str(name)
    }
}

/// Two cut points splitting a metric into danger, warning and success.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandThresholds {
    pub success: f64,
    pub warning: f64,
    /// When false, lower values are better and the cut points are upper bounds.
    pub higher_is_better: bool,
}

impl BandThresholds {
    pub const fn higher(success: f64, warning: f64) -> Self {
        Self {
            success,
            warning,
            higher_is_better: true,
        }
    }

    pub const fn lower(success: f64, warning: f64) -> Self {
        Self {
            success,
            warning,
            higher_is_better: false,
        }
    }

    pub fn classify(&self, value: f64) -> Band {
        if self.higher_is_better {
            if value >= self.success {
                Band::Success
            } else if value >= self.warning {
                Band::Warning
            } else {
                Band::Danger
            }
        } else if value <= self.success {
            Band::Success
        } else if value <= self.warning {
            Band::Warning
        } else {
            Band::Danger
        }
    }
}

pub const OVERALL_HAIR_SCORE_BANDS: BandThresholds = BandThresholds::higher(80.0, 50.0);
pub const HAIR_CALIBER_INDEX_PCT_BANDS: BandThresholds = BandThresholds::higher(70.0, 50.0);
pub const EHD_PERCENT_BANDS: BandThresholds = BandThresholds::higher(70.0, 40.0);
pub const HAIRS_PER_CM2_BANDS: BandThresholds = BandThresholds::higher(180.0, 120.0);
/// Weak-to-strong ratio: fewer vellus-like shafts is healthier.
pub const TERMINAL_TO_VELLUS_RATIO_BANDS: BandThresholds = BandThresholds::lower(25.0, 50.0);
pub const PERCENT_THICK_HAIRS_BANDS: BandThresholds = BandThresholds::higher(50.0, 30.0);
