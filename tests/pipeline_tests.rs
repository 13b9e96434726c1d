// tests/pipeline_tests.rs
use hairscan_core::Band;
use hairscan_core::constants::{MAX_EFFECTIVE_HAIR_DENSITY, REFERENCE_AREA_CM2};
use hairscan_cv::detection::normalize_payload;
use hairscan_cv::scoring::{
    ThicknessMetrics, calculate_combined_metrics, calculate_follicular_metrics,
};
use hairscan_cv::{AnalysisConfig, BBox, Detection, DetectionSet, HairAnalyzer};
use serde_json::json;
use std::process::Command;

fn spaced(labels: &[&str]) -> DetectionSet {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let x = (i % 9) as f64 * 0.11;
            let y = (i / 9) as f64 * 0.11;
            Detection::new(*label, 0.8, BBox::new(x, x + 0.04, y, y + 0.04))
        })
        .collect()
}

#[test]
fn test_calibration_constants() {
    assert_eq!(REFERENCE_AREA_CM2, 0.273);
    assert_eq!(MAX_EFFECTIVE_HAIR_DENSITY, 220.0);
}

#[test]
fn test_density_only_image() {
    let follicular = calculate_follicular_metrics(&spaced(&["1", "2", "1"]));
    let combined = calculate_combined_metrics(&follicular, &ThicknessMetrics::default());

    assert_eq!(follicular.rounded().density_per_cm2, 10.99);
    assert_eq!(combined.effective_hair_density, 0.0);
    assert_eq!(combined.overall_hair_score.value, 0.0);
    assert!(combined.ehd_percent.value.is_finite());
}

#[test]
fn test_upstream_payload_to_scorecard() {
    let density_payload = json!({
        "predictions": [{
            "displayNames": ["2", "1", "1", "3"],
            "confidences": [0.9, 0.8, 0.05, 0.7],
            "bboxes": [
                [0.10, 0.15, 0.10, 0.15],
                [0.11, 0.16, 0.11, 0.16],
                [0.50, 0.55, 0.50, 0.55],
                [0.70, 0.75, 0.20, 0.25]
            ]
        }]
    });
    let thickness_payload = json!([
        {"displayName": "strong", "confidence": 0.6, "bbox": [0.0, 0.05, 0.0, 0.05]},
        {"displayName": "strong", "confidence": 0.6, "bbox": [0.3, 0.35, 0.0, 0.05]},
        {"displayName": "medium", "confidence": 0.6, "bbox": [0.6, 0.65, 0.0, 0.05]},
        {"displayName": "weak", "confidence": 0.6, "bbox": [0.9, 0.95, 0.0, 0.05]},
        {"displayName": "hair", "confidence": 0.6, "bbox": [0.0, 0.05, 0.9, 0.95]}
    ]);

    let analyzer = HairAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze(
        normalize_payload(&density_payload).unwrap(),
        normalize_payload(&thickness_payload).unwrap(),
    );

    // The "1" overlapping the "2" is evicted, the 0.05 one is filtered.
    let density = &report.density_results;
    assert_eq!(density.total_predictions, 2);
    assert_eq!(density.follicular_metrics.total_hairs, 5);
    assert_eq!(density.follicular_metrics.units_with_multiple_hairs, 2);

    let thickness = &report.thickness_results;
    assert_eq!(thickness.total_predictions, 5);
    assert_eq!(thickness.thickness_metrics.total_detections, 4);

    // 5 hairs split 2/1/1 of 4 -> 2.5 strong, 1.25 medium, 1.25 weak
    let combined = &report.combined_metrics;
    assert_eq!(combined.effective_strong, 2.5);
    assert_eq!(combined.effective_medium, 1.25);
    assert_eq!(combined.hair_caliber_index, 10);
    assert_eq!(combined.terminal_to_vellus_ratio.value, 50.0);
    assert_eq!(combined.terminal_to_vellus_ratio.band, Band::Warning);
    assert_eq!(combined.percent_thick_hairs.value, 50.0);
    assert_eq!(combined.percent_thick_hairs.band, Band::Success);
}

#[test]
fn test_report_json_shape() {
    let analyzer = HairAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze(spaced(&["1", "2"]), spaced(&["weak", "strong"]));
    let value = serde_json::to_value(&report).unwrap();

    assert!(value["density_results"]["follicular_metrics"]["density_per_cm2"].is_number());
    assert_eq!(value["thickness_results"]["thickness_metrics"]["strong_count"], 1);
    assert_eq!(value["combined_metrics"]["overall_hair_score"]["band"], "danger");
    assert_eq!(value["model_parameters"]["density"]["confidence_threshold"], 0.2);
    // Suppression output is ranked, so the two-hair unit comes first.
    assert_eq!(
        value["density_results"]["detections"][1]["bbox"],
        json!([0.0, 0.04, 0.0, 0.04])
    );
}

#[test]
fn test_cli_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let density = dir.path().join("density.json");
    let thickness = dir.path().join("thickness.json");
    let output = dir.path().join("report.json");

    std::fs::write(
        &density,
        json!({"displayNames": ["1", "2"], "confidences": [0.9, 0.9],
               "bboxes": [[0.1, 0.2, 0.1, 0.2], [0.6, 0.7, 0.6, 0.7]]})
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        &thickness,
        json!([{"label": "medium", "confidence": 0.5, "bbox": [0.1, 0.2, 0.1, 0.2]}]).to_string(),
    )
    .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_hairscan"))
        .arg("--density")
        .arg(&density)
        .arg("--thickness")
        .arg(&thickness)
        .arg("--output")
        .arg(&output)
        .arg("--compact")
        .status()
        .unwrap();
    assert!(status.success());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["density_results"]["follicular_metrics"]["total_hairs"], 3);
    // 3 hairs, all medium -> floor(4.5)
    assert_eq!(report["combined_metrics"]["hair_caliber_index"], 4);
}

#[test]
fn test_cli_rejects_malformed_payload() {
    let dir = tempfile::tempdir().unwrap();
    let density = dir.path().join("density.json");
    std::fs::write(&density, r#"[{"label": "1", "bbox": [0.1, 0.2, 0.1, 0.2]}]"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_hairscan"))
        .arg("--density")
        .arg(&density)
        .arg("--thickness")
        .arg(&density)
        .output()
        .unwrap();
    assert!(!output.status.success());
}
