//! Detection configuration

use crate::error::ConfigError;
use hairscan_core::LabelScheme;
use hairscan_core::constants::{
    DEFAULT_DENSITY_CONFIDENCE, DEFAULT_IOU_THRESHOLD, DEFAULT_MAX_PREDICTIONS,
    DEFAULT_PADDING_FACTOR, DEFAULT_THICKNESS_CONFIDENCE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Non-maximum suppression parameters for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NmsConfig {
    pub iou_threshold: f64,
    /// 0 keeps boxes as-is, 1 doubles each side before comparing.
    pub padding_factor: f64,
    pub max_predictions: usize,
}

impl Default for NmsConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            padding_factor: DEFAULT_PADDING_FACTOR,
            max_predictions: DEFAULT_MAX_PREDICTIONS,
        }
    }
}

impl NmsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("iou_threshold", self.iou_threshold)?;
        check_unit("padding_factor", self.padding_factor)
    }
}

/// Post-processing parameters for one detection model
///
/// A model table in a config file must name its confidence threshold; the
/// suppression parameters fall back to [`NmsConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub confidence_threshold: f64,
    #[serde(default)]
    pub nms: NmsConfig,
}

impl ModelConfig {
    /// Follicular-unit detector defaults
    pub fn density() -> Self {
        Self {
            confidence_threshold: DEFAULT_DENSITY_CONFIDENCE,
            nms: NmsConfig::default(),
        }
    }

    /// Hair-shaft caliber detector defaults
    pub fn thickness() -> Self {
        Self {
            confidence_threshold: DEFAULT_THICKNESS_CONFIDENCE,
            nms: NmsConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("confidence_threshold", self.confidence_threshold)?;
        self.nms.validate()
    }
}

/// Main analysis configuration
///
/// Label interpretation follows the model role: density labels are hair
/// counts, thickness labels are calibers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "ModelConfig::density")]
    pub density: ModelConfig,
    #[serde(default = "ModelConfig::thickness")]
    pub thickness: ModelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            density: ModelConfig::density(),
            thickness: ModelConfig::thickness(),
        }
    }
}

impl AnalysisConfig {
    pub const DENSITY_LABELS: LabelScheme = LabelScheme::HairCount;
    pub const THICKNESS_LABELS: LabelScheme = LabelScheme::Thickness;

    /// Load a configuration from a `.toml` or `.json` file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AnalysisConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&raw)?,
            Some("json") => serde_json::from_str(&raw)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.density.validate()?;
        self.thickness.validate()
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}
