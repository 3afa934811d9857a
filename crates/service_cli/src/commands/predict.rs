//! Predict command implementation
//!
//! Builds the monthly crisis-probability series from the reference date.

use chrono::NaiveDate;
use contagion_core::Prediction;
use contagion_risk::{build_series, headline_probability, RawDataset};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::{emit, noise, snapshot};
use crate::config::CliConfig;
use crate::dataset::load_dataset;
use crate::{CliError, Result};

/// Series printed by `predict`.
#[derive(Debug, Serialize)]
pub struct PredictionOutput {
    pub reference_date: NaiveDate,
    pub horizon_months: u32,
    pub headline_probability: Option<f64>,
    pub predictions: Vec<Prediction>,
}

/// Prediction series for an in-memory dataset.
pub fn execute(
    dataset: &RawDataset,
    config: &CliConfig,
    horizon: Option<u32>,
) -> Result<PredictionOutput> {
    let horizon_months = horizon.unwrap_or(config.horizon_months);
    if horizon_months == 0 {
        return Err(CliError::InvalidArgument(
            "horizon must be greater than 0".to_string(),
        ));
    }

    let mut rng = noise(config);
    let snapshot = snapshot(dataset, &mut rng)?;
    let labels = dataset.tables()?.labels;

    let predictions = build_series(
        labels,
        snapshot.systemic_risk.value,
        snapshot.reference_date,
        horizon_months,
        &mut rng,
    );

    Ok(PredictionOutput {
        reference_date: snapshot.reference_date,
        horizon_months,
        headline_probability: headline_probability(&predictions),
        predictions,
    })
}

/// Run the predict command
pub fn run(dataset_path: &Path, horizon: Option<u32>, config: &CliConfig) -> Result<()> {
    info!("Building prediction series...");
    info!("  Dataset: {}", dataset_path.display());

    let dataset = load_dataset(dataset_path)?;
    let output = execute(&dataset, config, horizon)?;

    info!(
        points = output.predictions.len(),
        headline = output.headline_probability,
        "Prediction series complete"
    );
    emit(&output)
}
