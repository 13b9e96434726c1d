//! Utility modules

pub mod nms;

pub use nms::PriorityNms;
