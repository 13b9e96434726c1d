//! Class-priority non-maximum suppression
//!
//! Suppression runs globally across classes. When two padded boxes overlap
//! beyond the IoU threshold, the higher class priority wins regardless of
//! confidence, so a two-hair follicular unit evicts an overlapping one-hair
//! unit. Equal priorities fall back to the usual keep-the-first rule.

use crate::bbox::{BBox, Detection, DetectionSet};
use crate::detection::config::NmsConfig;
use crate::traits::NonMaxSuppression;
use hairscan_core::LabelScheme;
use log::debug;

/// Priority-aware suppressor for one model's detections
#[derive(Debug, Clone, Copy)]
pub struct PriorityNms {
    config: NmsConfig,
    labels: LabelScheme,
}

struct Kept {
    detection: Detection,
    padded: BBox,
    priority: u32,
}

impl PriorityNms {
    pub fn new(config: NmsConfig, labels: LabelScheme) -> Self {
        Self { config, labels }
    }

    /// Rank by (priority, confidence) descending. The sort is stable, so ties
    /// keep their input order.
    fn rank(&self, detections: DetectionSet) -> Vec<(u32, Detection)> {
        let mut ranked: Vec<(u32, Detection)> = detections
            .into_iter()
            .map(|d| (self.labels.priority(&d.label), d))
            .collect();
        ranked.sort_by(|(pa, a), (pb, b)| {
            pb.cmp(pa)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });
        ranked
    }
}

impl NonMaxSuppression for PriorityNms {
    fn suppress(&self, detections: DetectionSet) -> DetectionSet {
        if detections.is_empty() {
            return detections;
        }
        let input_len = detections.len();

        let mut kept: Vec<Kept> = Vec::new();
        for (priority, detection) in self.rank(detections) {
            let padded = detection.bbox.pad(self.config.padding_factor);

            let conflict = kept
                .iter()
                .position(|k| padded.overlaps(&k.padded, self.config.iou_threshold));

            match conflict {
                None => kept.push(Kept {
                    detection,
                    padded,
                    priority,
                }),
                // Unreachable after the ranking sort; kept so a higher class always wins.
                Some(idx) if priority > kept[idx].priority => {
                    kept.remove(idx);
                    kept.push(Kept {
                        detection,
                        padded,
                        priority,
                    });
                }
                Some(_) => {}
            }
        }

        kept.truncate(self.config.max_predictions);
        debug!("nms kept {} of {} detections", kept.len(), input_len);

        kept.into_iter().map(|k| k.detection).collect()
    }
}
