//! Analyse command implementation
//!
//! Normalises a dataset and reports the reference-date snapshot summary.

use chrono::NaiveDate;
use contagion_core::MarketSnapshot;
use contagion_risk::{headline_probability, NarrativeContext, RawDataset};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::{emit, noise, resolve_count, snapshot};
use crate::config::CliConfig;
use crate::dataset::load_dataset;
use crate::Result;

/// Snapshot summary printed by `analyse`.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub reference_date: NaiveDate,
    pub institution_count: usize,
    pub exposure_count: usize,
    pub total_assets: f64,
    pub market: MarketSnapshot,
    pub headline_probability: Option<f64>,
    /// Systemic index and riskiest institutions
    pub narrative: NarrativeContext,
}

/// Builds the summary for an in-memory dataset.
pub fn execute(dataset: &RawDataset, config: &CliConfig, top: Option<usize>) -> Result<AnalysisSummary> {
    let top = resolve_count(top, config.narrative_top_n, "top")?;
    let mut rng = noise(config);
    let snapshot = snapshot(dataset, &mut rng)?;

    Ok(AnalysisSummary {
        reference_date: snapshot.reference_date,
        institution_count: snapshot.institution_count(),
        exposure_count: snapshot.exposures.len(),
        total_assets: snapshot.total_assets(),
        market: snapshot.market.clone(),
        headline_probability: headline_probability(&snapshot.predictions),
        narrative: NarrativeContext::from_dataset(&snapshot, top),
    })
}

/// Run the analyse command
pub fn run(dataset_path: &Path, top: Option<usize>, config: &CliConfig) -> Result<()> {
    info!("Starting analysis...");
    info!("  Dataset: {}", dataset_path.display());

    let dataset = load_dataset(dataset_path)?;
    let summary = execute(&dataset, config, top)?;

    info!(
        reference_date = %summary.reference_date,
        institutions = summary.institution_count,
        systemic_risk = summary.narrative.systemic_risk.value,
        status = %summary.narrative.systemic_risk.status,
        "Analysis complete"
    );
    emit(&summary)
}
