//! grade-gate - classify scores into letter grades
//!
//! Command line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse arguments and load `grade-gate.yaml` (defaults when absent)
//! 2. Initialize logging → `<log dir>/grade-gate.<date>` plus stderr
//! 3. Parse the grade file into a [`ConfigStore`]
//! 4. Validate the Total/A/B/C/D ranges into [`GradeThresholds`]
//! 5. Classify the scores and print `[index] score -> label` per line
//!
//! Any failure in steps 3-5 exits with a non-zero status.

use anyhow::{Context, Result};
use clap::Parser;
use grade_gate::config::SETTINGS_FILE_NAME;
use grade_gate::{
    APP_NAME, ConfigStore, EvaluationMetrics, GradeThresholds, SettingsManager, VERSION,
};

#[derive(Parser)]
#[command(name = "grade-gate")]
#[command(version, about = "Validate grade bands from an INI file and classify scores", long_about = None)]
struct Cli {
    /// Settings file with driver defaults
    #[arg(short, long, default_value = SETTINGS_FILE_NAME)]
    settings: String,

    /// Grade file to read (overrides the settings file)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Directory for log files (overrides the settings file)
    #[arg(long)]
    log_dir: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Do not log to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Scores to classify; the settings' default list is used when omitted
    #[arg(value_name = "SCORE", allow_negative_numbers = true)]
    scores: Vec<i32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = SettingsManager::new(&cli.settings).load()?;
    if let Some(grade_file) = cli.config {
        settings.grade_file = grade_file;
    }
    if let Some(log_dir) = cli.log_dir {
        settings.log_dir = log_dir;
    }
    settings.debug_mode |= cli.debug;
    settings.console_output &= !cli.quiet;

    let _log_guard = grade_gate::logging::setup_logging_with_console(
        &settings.log_dir,
        &settings.log_prefix,
        settings.debug_mode,
        settings.console_output,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let store = ConfigStore::open(&settings.grade_file)
        .with_context(|| format!("Failed to load grade file {}", settings.grade_file))
        .inspect_err(|e| tracing::error!("{:#}", e))?;

    let thresholds = GradeThresholds::new(store)
        .with_context(|| format!("Invalid grade ranges in {}", settings.grade_file))
        .inspect_err(|e| tracing::error!("{:#}", e))?;

    let scores = if cli.scores.is_empty() {
        tracing::info!(
            "No scores given, using {} default scores",
            settings.default_scores.len()
        );
        settings.default_scores
    } else {
        cli.scores
    };

    tracing::info!("Evaluating {} scores", scores.len());
    let evaluations = thresholds
        .evaluate_all(&scores)
        .context("Failed to evaluate scores")?;

    for evaluation in &evaluations {
        println!("{}", evaluation);
    }

    let metrics = EvaluationMetrics::new();
    metrics.record_all(&evaluations);
    metrics.log_summary();

    tracing::info!("Evaluation complete");
    Ok(())
}
