//! Reference-date snapshot assembly.

use chrono::NaiveDate;
use contagion_core::{
    Classification, Exposure, ExposureRow, Institution, InstitutionId, LabelRow, MarketRow,
    MarketSnapshot, MetricsRow, NoiseRng, Prediction, Sector,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use super::error::DatasetError;
use super::names::display_name;
use crate::network::{aggregate, NetworkMetrics};
use crate::prediction::predictions_from_labels;
use crate::scoring::{risk_score, systemic_risk_index, RiskScoreInputs, SystemicRiskIndex};

/// The four input tables as handed over by the ingestion layer.
///
/// A table that was never supplied is `None`; an empty table is `Some(vec![])`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawDataset {
    /// Institution metrics table
    #[serde(default)]
    pub metrics: Option<Vec<MetricsRow>>,
    /// Exposure network table
    #[serde(default, alias = "exposures")]
    pub network: Option<Vec<ExposureRow>>,
    /// Market data table
    #[serde(default)]
    pub market: Option<Vec<MarketRow>>,
    /// Crisis label table
    #[serde(default)]
    pub labels: Option<Vec<LabelRow>>,
}

impl RawDataset {
    /// Borrows all four tables, failing if any is absent.
    ///
    /// # Errors
    ///
    /// `DatasetError::MissingMandatoryInput` naming every absent table.
    pub fn tables(&self) -> Result<DatasetTables<'_>, DatasetError> {
        let mut missing = Vec::new();
        if self.metrics.is_none() {
            missing.push("metrics");
        }
        if self.network.is_none() {
            missing.push("network");
        }
        if self.market.is_none() {
            missing.push("market");
        }
        if self.labels.is_none() {
            missing.push("labels");
        }

        match (&self.metrics, &self.network, &self.market, &self.labels) {
            (Some(metrics), Some(exposures), Some(market), Some(labels)) => Ok(DatasetTables {
                metrics,
                exposures,
                market,
                labels,
            }),
            _ => Err(DatasetError::MissingMandatoryInput(missing)),
        }
    }
}

/// Borrowed view over the four mandatory tables.
///
/// Rows are assumed to be in date order; nothing is re-sorted.
#[derive(Clone, Copy, Debug)]
pub struct DatasetTables<'a> {
    /// Institution metrics rows
    pub metrics: &'a [MetricsRow],
    /// Exposure network rows
    pub exposures: &'a [ExposureRow],
    /// Market data rows
    pub market: &'a [MarketRow],
    /// Crisis label rows
    pub labels: &'a [LabelRow],
}

/// Consistent snapshot of the system on the reference date.
#[derive(Clone, Debug, Serialize)]
pub struct NormalisedDataset {
    /// Date of the last metrics row
    pub reference_date: NaiveDate,
    /// Market conditions applied to the scores
    pub market: MarketSnapshot,
    /// One record per distinct institution on the reference date
    pub institutions: Vec<Institution>,
    /// Exposure edges between institutions in the snapshot
    pub exposures: Vec<Exposure>,
    /// One prediction per label row
    pub predictions: Vec<Prediction>,
    /// System-wide risk index
    pub systemic_risk: SystemicRiskIndex,
}

impl NormalisedDataset {
    /// Looks up an institution by key.
    pub fn institution(&self, id: &InstitutionId) -> Option<&Institution> {
        self.institutions.iter().find(|inst| &inst.id == id)
    }

    /// Returns the number of institutions.
    #[inline]
    pub fn institution_count(&self) -> usize {
        self.institutions.len()
    }

    /// Sum of total assets over the snapshot.
    pub fn total_assets(&self) -> f64 {
        self.institutions.iter().map(|inst| inst.total_assets).sum()
    }

    /// The `n` riskiest institutions, highest score first. Ties keep
    /// snapshot order.
    pub fn top_by_risk_score(&self, n: usize) -> Vec<&Institution> {
        let mut ranked: Vec<&Institution> = self.institutions.iter().collect();
        ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        ranked.truncate(n);
        ranked
    }
}

/// Normalises a raw dataset.
///
/// # Errors
///
/// - `DatasetError::MissingMandatoryInput` if a table is absent
/// - `DatasetError::EmptyMetrics` if the metrics table has no rows
pub fn normalise(
    dataset: &RawDataset,
    rng: &mut NoiseRng,
) -> Result<NormalisedDataset, DatasetError> {
    normalise_tables(dataset.tables()?, rng)
}

/// Normalises borrowed tables into a reference-date snapshot.
///
/// # Errors
///
/// `DatasetError::EmptyMetrics` if the metrics table has no rows.
pub fn normalise_tables(
    tables: DatasetTables<'_>,
    rng: &mut NoiseRng,
) -> Result<NormalisedDataset, DatasetError> {
    let reference_date = tables
        .metrics
        .last()
        .map(|row| row.date)
        .ok_or(DatasetError::EmptyMetrics)?;
    let market = select_market(tables.market, reference_date);

    let rows = snapshot_rows(tables.metrics, reference_date);
    let members: HashSet<&InstitutionId> = rows.iter().map(|row| &row.institution_id).collect();

    let edge_rows: Vec<ExposureRow> = tables
        .exposures
        .iter()
        .filter(|row| row.date == reference_date && !row.is_self_loop())
        .filter(|row| members.contains(&row.creditor_id) && members.contains(&row.debtor_id))
        .cloned()
        .collect();
    let dropped = tables
        .exposures
        .iter()
        .filter(|row| row.date == reference_date)
        .count()
        - edge_rows.len();
    if dropped > 0 {
        debug!(
            dropped,
            "Dropped self-loop or out-of-snapshot exposure rows"
        );
    }

    let network = aggregate(&edge_rows, reference_date);
    let institutions: Vec<Institution> = rows
        .iter()
        .enumerate()
        .map(|(position, row)| build_institution(position, row, &market, &network))
        .collect();

    let exposures: Vec<Exposure> = edge_rows
        .iter()
        .map(|row| Exposure {
            source: row.creditor_id.clone(),
            target: row.debtor_id.clone(),
            amount: row.amount_or_default(),
            collateral: row.collateral(),
        })
        .collect();

    let systemic_risk = systemic_risk_index(&institutions, &market, rng);
    let predictions =
        predictions_from_labels(tables.labels, systemic_risk.value, reference_date, rng);

    info!(
        %reference_date,
        institutions = institutions.len(),
        exposures = exposures.len(),
        predictions = predictions.len(),
        systemic_risk = systemic_risk.value,
        "Dataset normalised"
    );

    Ok(NormalisedDataset {
        reference_date,
        market,
        institutions,
        exposures,
        predictions,
        systemic_risk,
    })
}

/// Market row on the reference date, else the last row, else the default.
fn select_market(rows: &[MarketRow], reference_date: NaiveDate) -> MarketSnapshot {
    let Some(row) = rows
        .iter()
        .find(|row| row.date == reference_date)
        .or_else(|| rows.last())
    else {
        debug!("No market data, using default volatility");
        return MarketSnapshot::default();
    };
    if row.date != reference_date {
        debug!(market_date = %row.date, %reference_date, "No market row on reference date, using last row");
    }
    MarketSnapshot {
        date: Some(row.date),
        vix: row.vix_or_default(),
        yield_curve_slope: row.yield_curve_slope,
        gdp_growth: row.gdp_growth,
    }
}

/// Metrics rows on the reference date, first row per institution.
fn snapshot_rows(metrics: &[MetricsRow], reference_date: NaiveDate) -> Vec<&MetricsRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for row in metrics.iter().filter(|row| row.date == reference_date) {
        if seen.insert(&row.institution_id) {
            rows.push(row);
        } else {
            warn!(institution = %row.institution_id, "Duplicate metrics row on reference date skipped");
        }
    }
    rows
}

fn build_institution(
    position: usize,
    row: &MetricsRow,
    market: &MarketSnapshot,
    network: &HashMap<InstitutionId, NetworkMetrics>,
) -> Institution {
    let defaulted = row.defaulted_field_count();
    if defaulted > 0 {
        debug!(institution = %row.institution_id, defaulted, "Numeric fields defaulted");
    }

    let total_assets = row.total_assets_or_default();
    let net = network
        .get(&row.institution_id)
        .copied()
        .unwrap_or_default();

    Institution {
        id: row.institution_id.clone(),
        name: row
            .name
            .clone()
            .unwrap_or_else(|| display_name(&row.institution_id)),
        classification: row
            .classification
            .unwrap_or_else(|| Classification::from_total_assets(total_assets)),
        sector: row.sector.unwrap_or_else(|| Sector::round_robin(position)),
        total_assets,
        leverage_ratio: row.leverage_ratio_or_default(),
        liquidity_ratio: row.liquidity_ratio_or_default(),
        roe: row.roe_or_default(),
        cds_spread: row.cds_spread_or_default(),
        risk_score: risk_score(&RiskScoreInputs::from(row), market),
        exposure_volume: net.volume,
        centrality: net.centrality,
    }
}
