//! Failures at the pipeline boundaries
//!
//! The scoring pipeline itself is total; only configuration and upstream
//! payloads can be rejected.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format {0:?} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed prediction payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("prediction arrays disagree in length: {names} labels, {confidences} confidences, {bboxes} boxes")]
    LengthMismatch {
        names: usize,
        confidences: usize,
        bboxes: usize,
    },

    #[error("prediction {index} has {len} box coordinates, expected 4")]
    BboxArity { index: usize, len: usize },

    #[error("prediction {index} has confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange { index: usize, value: f64 },

    #[error("unrecognized prediction payload shape")]
    UnsupportedShape,
}
