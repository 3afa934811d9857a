//! Rank command implementation
//!
//! Ranks the largest institutions by the assets their failure would wipe out.

use contagion_risk::{rank_systemic_importance, RawDataset, SystemicRanking};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::{emit, noise, resolve_count, resolve_lgd, snapshot};
use crate::config::CliConfig;
use crate::dataset::load_dataset;
use crate::Result;

/// Rankings printed by `rank`.
#[derive(Debug, Serialize)]
pub struct RankingOutput {
    pub lgd: f64,
    pub top_n: usize,
    pub rankings: Vec<SystemicRanking>,
}

/// Rankings for an in-memory dataset.
pub fn execute(
    dataset: &RawDataset,
    config: &CliConfig,
    top: Option<usize>,
    lgd: Option<f64>,
) -> Result<RankingOutput> {
    let top_n = resolve_count(top, config.ranking_top_n, "top")?;
    let lgd = resolve_lgd(lgd, config)?;
    let mut rng = noise(config);
    let snapshot = snapshot(dataset, &mut rng)?;

    let rankings = rank_systemic_importance(&snapshot.institutions, &snapshot.exposures, lgd, top_n)?;
    Ok(RankingOutput {
        lgd,
        top_n,
        rankings,
    })
}

/// Run the rank command
pub fn run(dataset_path: &Path, top: Option<usize>, lgd: Option<f64>, config: &CliConfig) -> Result<()> {
    info!("Starting systemic importance ranking...");
    info!("  Dataset: {}", dataset_path.display());

    let dataset = load_dataset(dataset_path)?;
    let output = execute(&dataset, config, top, lgd)?;

    if let Some(first) = output.rankings.first() {
        info!(
            institution = %first.institution_id,
            potential_loss = first.potential_loss,
            "Most systemically important institution"
        );
    }
    emit(&output)
}
