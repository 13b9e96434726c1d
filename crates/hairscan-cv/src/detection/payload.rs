//! Normalization of upstream prediction payloads
//!
//! The hosted detectors answer with one prediction object per image holding
//! parallel `displayNames` / `confidences` / `bboxes` arrays. Older clients
//! send a list of `{displayName, confidence, bbox}` records instead, either
//! flat or nested once per image under `predictions`.
//! Both are turned into a typed [`DetectionSet`] here so that nothing
//! downstream has to guess at missing fields.

use crate::bbox::{BBox, Detection, DetectionSet};
use crate::error::PayloadError;
use serde::Deserialize;
use serde_json::Value;

const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchPrediction {
    display_names: Vec<String>,
    confidences: Vec<f64>,
    bboxes: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct PredictionRecord {
    #[serde(alias = "displayName")]
    label: Option<String>,
    confidence: f64,
    bbox: Vec<f64>,
}

/// Convert an upstream prediction payload into a detection set.
pub fn normalize_payload(payload: &Value) -> Result<DetectionSet, PayloadError> {
    match payload {
        Value::Object(map) if map.contains_key("predictions") => {
            normalize_payload(&map["predictions"])
        }
        Value::Object(map) if map.contains_key("displayNames") => {
            let batch: BatchPrediction = serde_json::from_value(payload.clone())?;
            from_batch(batch)
        }
        Value::Array(items) => match items.first() {
            None => Ok(DetectionSet::new()),
            // One prediction object per submitted image; we submit one image.
            Some(Value::Object(map)) if map.contains_key("displayNames") => {
                normalize_payload(&items[0])
            }
            // Per-image list of records nested inside `predictions`.
            Some(Value::Array(_)) => normalize_payload(&items[0]),
            Some(Value::Object(_)) => {
                let records: Vec<PredictionRecord> = serde_json::from_value(payload.clone())?;
                records
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| {
                        detection(
                            index,
                            record.label.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                            record.confidence,
                            &record.bbox,
                        )
                    })
                    .collect()
            }
            Some(_) => Err(PayloadError::UnsupportedShape),
        },
        _ => Err(PayloadError::UnsupportedShape),
    }
}

fn from_batch(batch: BatchPrediction) -> Result<DetectionSet, PayloadError> {
    let names = batch.display_names.len();
    let confidences = batch.confidences.len();
    let bboxes = batch.bboxes.len();
    if names != confidences || names != bboxes {
        return Err(PayloadError::LengthMismatch {
            names,
            confidences,
            bboxes,
        });
    }

    batch
        .display_names
        .into_iter()
        .zip(batch.confidences)
        .zip(batch.bboxes)
        .enumerate()
        .map(|(index, ((label, confidence), bbox))| detection(index, label, confidence, &bbox))
        .collect()
}

fn detection(
    index: usize,
    label: String,
    confidence: f64,
    coords: &[f64],
) -> Result<Detection, PayloadError> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(PayloadError::ConfidenceOutOfRange {
            index,
            value: confidence,
        });
    }
    let coords: [f64; 4] = coords.try_into().map_err(|_| PayloadError::BboxArity {
        index,
        len: coords.len(),
    })?;
    Ok(Detection::new(label, confidence, BBox::from(coords)))
}
