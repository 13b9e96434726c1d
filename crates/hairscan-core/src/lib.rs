//! Hairscan domain primitives
//!
//! Calibration constants, label interpretation and qualitative banding shared
//! by the detection post-processing pipeline.

pub mod band;
pub mod constants;
pub mod label;

pub use band::{Band, BandThresholds};
pub use label::{LabelScheme, ThicknessClass};

/// Round a value to a fixed number of decimal places for display.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
