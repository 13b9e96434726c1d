//! Bounding box geometry and detection collections
//!
//! Boxes are normalized to the image size and stored as
//! `[x_min, x_max, y_min, y_max]`, the layout the upstream detector emits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Axis-aligned box in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BBox {
    /// Create a new bounding box from `[x_min, x_max, y_min, y_max]` order
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).max(0.0)
    }

    /// Calculate area of the bounding box
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Calculate center point
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Swap inverted edges so that min <= max on both axes.
    pub fn ordered(&self) -> BBox {
        BBox::new(
            self.x_min.min(self.x_max),
            self.x_min.max(self.x_max),
            self.y_min.min(self.y_max),
            self.y_min.max(self.y_max),
        )
    }

    /// Clamp every coordinate into `[0, 1]`. NaN clamps to 0.
    pub fn clamped(&self) -> BBox {
        let unit = |v: f64| v.max(0.0).min(1.0);
        BBox::new(
            unit(self.x_min),
            unit(self.x_max),
            unit(self.y_min),
            unit(self.y_max),
        )
    }

    /// Grow the box about its center by `1 + padding_factor` per side length,
    /// then clamp into the image.
    ///
    /// A zero factor returns the ordered, clamped box untouched, so valid
    /// boxes come back bit-for-bit identical.
    pub fn pad(&self, padding_factor: f64) -> BBox {
        let base = self.ordered();
        if padding_factor == 0.0 {
            return base.clamped();
        }

        let scale = 1.0 + padding_factor;
        let (cx, cy) = base.center();
        let half_w = base.width() * scale / 2.0;
        let half_h = base.height() * scale / 2.0;

        BBox::new(cx - half_w, cx + half_w, cy - half_h, cy + half_h).clamped()
    }

    /// Calculate intersection over union (IoU) with another box
    pub fn iou(&self, other: &BBox) -> f64 {
        let x1 = self.x_min.max(other.x_min);
        let x2 = self.x_max.min(other.x_max);
        let y1 = self.y_min.max(other.y_min);
        let y2 = self.y_max.min(other.y_max);

        if x2 < x1 || y2 < y1 {
            return 0.0;
        }

        let intersection = (x2 - x1) * (y2 - y1);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }

        intersection / union
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &BBox, threshold: f64) -> bool {
        self.iou(other) > threshold
    }
}

impl From<[f64; 4]> for BBox {
    fn from(coords: [f64; 4]) -> Self {
        BBox::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.x_min, bbox.x_max, bbox.y_min, bbox.y_max]
    }
}

/// One candidate object found by a detection model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    pub bbox: BBox,
    /// Overlay colour for the annotation renderer, set after suppression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<(u8, u8, u8)>,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64, bbox: BBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
            color: None,
        }
    }

    pub fn with_color(mut self, color: (u8, u8, u8)) -> Self {
        self.color = Some(color);
        self
    }
}

/// Detections produced by one model invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSet {
    detections: Vec<Detection>,
}

impl DetectionSet {
    /// Create new empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn push(&mut self, detection: Detection) {
        self.detections.push(detection);
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.detections
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Keep detections at or above a confidence threshold
    pub fn filter_by_confidence(mut self, threshold: f64) -> Self {
        self.detections.retain(|d| d.confidence >= threshold);
        self
    }

    /// Number of detections per label
    pub fn class_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for detection in &self.detections {
            *counts.entry(detection.label.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }
}

impl IntoIterator for DetectionSet {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

impl FromIterator<Detection> for DetectionSet {
    fn from_iter<T: IntoIterator<Item = Detection>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
