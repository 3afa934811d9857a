//! Simulate command implementation
//!
//! Runs one default cascade over the reference-date snapshot.

use contagion_core::InstitutionId;
use contagion_risk::{simulate, CascadeReport, RawDataset};
use std::path::Path;
use tracing::info;

use super::{emit, noise, resolve_lgd, snapshot};
use crate::config::CliConfig;
use crate::dataset::load_dataset;
use crate::Result;

/// Cascade report for an in-memory dataset.
pub fn execute(
    dataset: &RawDataset,
    config: &CliConfig,
    start: &str,
    lgd: Option<f64>,
) -> Result<CascadeReport> {
    let lgd = resolve_lgd(lgd, config)?;
    let mut rng = noise(config);
    let snapshot = snapshot(dataset, &mut rng)?;

    let start = InstitutionId::new(start.trim());
    let result = simulate(&snapshot.institutions, &snapshot.exposures, &start, lgd)?;
    Ok(CascadeReport::from_result(&result, &snapshot.institutions))
}

/// Run the simulate command
pub fn run(dataset_path: &Path, start: &str, lgd: Option<f64>, config: &CliConfig) -> Result<()> {
    info!("Starting cascade simulation...");
    info!("  Dataset: {}", dataset_path.display());
    info!("  Trigger: {}", start);

    let dataset = load_dataset(dataset_path)?;
    let report = execute(&dataset, config, start, lgd)?;

    info!(
        failed = report.failed_count,
        depth = report.cascade_depth,
        percent_wiped = report.percent_wiped,
        "Simulation complete"
    );
    emit(&report)
}
