//! Summaries handed to the report exporter and the narrative generator.
//!
//! Both consumers are external; this module only shapes the data they
//! read from a cascade run, a snapshot, and a prediction series.

use contagion_core::{Institution, InstitutionId, Prediction};
use serde::Serialize;
use std::collections::HashMap;

use crate::cascade::CascadeResult;
use crate::normaliser::NormalisedDataset;
use crate::scoring::SystemicRiskIndex;

/// A failed institution cross-referenced against the snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailedInstitution {
    /// Institution key
    pub id: InstitutionId,
    /// Display name
    pub name: String,
    /// Total assets wiped out
    pub total_assets: f64,
    /// Round in which it failed, 0 for the trigger
    pub round: usize,
}

/// Exporter view of one cascade run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CascadeReport {
    /// Trigger institution
    pub patient_zero: InstitutionId,
    /// Loss given default used for the run
    pub lgd: f64,
    /// Number of failed institutions, trigger included
    pub failed_count: usize,
    /// Rounds beyond round 0 that produced failures
    pub cascade_depth: usize,
    /// Sum of total assets over failed institutions
    pub total_loss: f64,
    /// Share of snapshot assets wiped out, in percent
    pub percent_wiped: f64,
    /// Failed institutions in failure order
    pub failed: Vec<FailedInstitution>,
}

impl CascadeReport {
    /// Builds the report, looking failed ids up in `institutions`.
    ///
    /// Ids missing from `institutions` are reported with the id as name
    /// and zero assets.
    pub fn from_result(result: &CascadeResult, institutions: &[Institution]) -> Self {
        let mut by_id: HashMap<&InstitutionId, &Institution> =
            HashMap::with_capacity(institutions.len());
        for inst in institutions {
            by_id.entry(&inst.id).or_insert(inst);
        }

        let failed = result
            .failure_rounds
            .iter()
            .enumerate()
            .flat_map(|(round, ids)| ids.iter().map(move |id| (round, id)))
            .map(|(round, id)| match by_id.get(id) {
                Some(inst) => FailedInstitution {
                    id: id.clone(),
                    name: inst.name.clone(),
                    total_assets: inst.total_assets,
                    round,
                },
                None => FailedInstitution {
                    id: id.clone(),
                    name: id.to_string(),
                    total_assets: 0.0,
                    round,
                },
            })
            .collect();

        Self {
            patient_zero: result.patient_zero.clone(),
            lgd: result.lgd,
            failed_count: result.failed_count(),
            cascade_depth: result.depth,
            total_loss: result.total_loss,
            percent_wiped: result.percent_wiped,
            failed,
        }
    }
}

/// Input for the narrative generator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NarrativeContext {
    /// Current systemic risk index
    pub systemic_risk: SystemicRiskIndex,
    /// Riskiest institutions, highest score first
    pub top_institutions: Vec<Institution>,
}

impl NarrativeContext {
    /// Top `n` institutions by risk score plus the snapshot's index.
    pub fn from_dataset(dataset: &NormalisedDataset, n: usize) -> Self {
        Self {
            systemic_risk: dataset.systemic_risk.clone(),
            top_institutions: dataset
                .top_by_risk_score(n)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// Headline crisis probability: the last prediction's probability.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use contagion_core::Prediction;
/// use contagion_risk::report::headline_probability;
///
/// let d = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let series = vec![Prediction::new(d, 0.3, 4.0), Prediction::new(d, 0.7, 8.0)];
/// assert_eq!(headline_probability(&series), Some(0.7));
/// assert_eq!(headline_probability(&[]), None);
/// ```
pub fn headline_probability(predictions: &[Prediction]) -> Option<f64> {
    predictions.last().map(|p| p.probability)
}
