//! Report assembly for the command line

use anyhow::Context;
use hairscan_cv::{AnalysisConfig, AnalysisReport, DetectionSet, HairAnalyzer, Result};
use hairscan_cv::detection::normalize_payload;
use log::info;
use std::io::Write;
use std::path::Path;

/// Read one model's predictions from a JSON file
pub fn load_detections(path: &Path) -> Result<DetectionSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read predictions: {:?}", path))?;
    let payload: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Predictions are not valid JSON: {:?}", path))?;
    normalize_payload(&payload).with_context(|| format!("Unusable predictions in {:?}", path))
}

/// Analyze one photograph from the two prediction files
pub fn run(density: &Path, thickness: &Path, config: AnalysisConfig) -> Result<AnalysisReport> {
    let analyzer = HairAnalyzer::new(config)?;
    let density = load_detections(density)?;
    let thickness = load_detections(thickness)?;
    info!(
        "Loaded {} density and {} thickness detections",
        density.len(),
        thickness.len()
    );
    Ok(analyzer.analyze(density, thickness))
}

pub fn log_summary(report: &AnalysisReport) {
    let follicular = &report.density_results.follicular_metrics;
    let thickness = &report.thickness_results.thickness_metrics;
    let combined = &report.combined_metrics;

    info!("Analysis completed:");
    info!(
        "  - Follicular units: {} ({} hairs, {:.2}/cm²)",
        follicular.total_units, follicular.total_hairs, follicular.density_per_cm2
    );
    info!(
        "  - Shafts: {} strong, {} medium, {} weak",
        thickness.strong_count, thickness.medium_count, thickness.weak_count
    );
    info!("  - Hair caliber index: {}", combined.hair_caliber_index);
    info!(
        "  - Effective hair density: {:.2} ({:.1}%, {})",
        combined.effective_hair_density, combined.ehd_percent.value, combined.ehd_percent.band
    );
    info!(
        "  - Overall hair score: {:.1} ({})",
        combined.overall_hair_score.value, combined.overall_hair_score.band
    );
}

/// Serialize the report to a file, or stdout when no path is given
pub fn write_report(report: &AnalysisReport, output: Option<&Path>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .context("Failed to serialize analysis report")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to: {:?}", path))?;
            info!("Report saved: {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}
