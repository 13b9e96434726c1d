use anyhow::{Context, Result};
use clap::Parser;
use hairscan_cv::AnalysisConfig;
use std::path::PathBuf;

mod report;

/// Score a scalp photograph from its density and thickness detections.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Density model predictions (upstream payload or detection list, JSON).
    #[arg(long)]
    density: PathBuf,
    /// Thickness model predictions (upstream payload or detection list, JSON).
    #[arg(long)]
    thickness: PathBuf,
    /// Analysis config (.toml or .json). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the density model's confidence threshold.
    #[arg(long)]
    density_confidence: Option<f64>,
    /// Override the thickness model's confidence threshold.
    #[arg(long)]
    thickness_confidence: Option<f64>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => AnalysisConfig::default(),
    };
    if let Some(confidence) = args.density_confidence {
        config.density.confidence_threshold = confidence;
    }
    if let Some(confidence) = args.thickness_confidence {
        config.thickness.confidence_threshold = confidence;
    }

    let analysis = report::run(&args.density, &args.thickness, config)?;
    report::log_summary(&analysis);
    report::write_report(&analysis, args.output.as_deref(), !args.compact)
}
