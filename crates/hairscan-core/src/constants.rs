//! Calibration constants of the imaging rig and the scoring model

/// Scalp area covered by one photograph, in cm² (7 mm × 3.94 mm field of view).
pub const REFERENCE_AREA_CM2: f64 = 0.273;

/// Detections below this confidence never count towards follicular metrics.
pub const DENSITY_CONFIDENCE_FLOOR: f64 = 0.1;

/// Highest achievable effective hair density (thickness score 3 at the density cap).
pub const MAX_EFFECTIVE_HAIR_DENSITY: f64 = 220.0;

/// Caliber weight of a strong (terminal) shaft, also the maximum thickness score.
pub const STRONG_WEIGHT: f64 = 3.0;
pub const MEDIUM_WEIGHT: f64 = 1.5;
pub const WEAK_WEIGHT: f64 = 1.0;

/// Density model defaults as exposed by the upload form.
pub const DEFAULT_DENSITY_CONFIDENCE: f64 = 0.2;
pub const DEFAULT_THICKNESS_CONFIDENCE: f64 = 0.1;
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.0;
pub const DEFAULT_PADDING_FACTOR: f64 = 0.5;
pub const DEFAULT_MAX_PREDICTIONS: usize = 100;
