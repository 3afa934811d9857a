//! Furfine-style default cascade.
//!
//! # Transition rule
//!
//! For every institution that failed in the previous round, each solvent
//! creditor holding an exposure to it loses `amount × lgd` of equity. Once
//! all of the round's write-downs are applied, every creditor written down
//! this round whose equity is at or below zero fails in this round.
//!
//! The run halts on the first round without new failures, or after
//! [`MAX_CASCADE_ROUNDS`] propagation rounds on cyclic or pathological graphs.

use contagion_core::{Exposure, Institution, InstitutionId};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use super::error::CascadeError;
use super::result::CascadeResult;
use super::state::SimulationState;

/// Hard cap on propagation rounds after round 0.
pub const MAX_CASCADE_ROUNDS: usize = 20;

/// Reusable cascade engine over one snapshot.
///
/// Building the simulator indexes institutions and inverts the exposure
/// list into per-debtor creditor lists once; each [`simulate`] call then
/// runs against a fresh `SimulationState`.
///
/// [`simulate`]: CascadeSimulator::simulate
///
/// # Examples
///
/// ```
/// use contagion_core::{Classification, Exposure, Institution, InstitutionId, Sector};
/// use contagion_risk::cascade::CascadeSimulator;
///
/// let bank = |id: &str| Institution {
///     id: InstitutionId::new(id),
///     name: id.to_string(),
///     classification: Classification::Regional,
///     sector: Sector::Banking,
///     total_assets: 100.0,
///     leverage_ratio: 10.0,
///     liquidity_ratio: 1.0,
///     roe: 0.0,
///     cds_spread: 100.0,
///     risk_score: 0.0,
///     exposure_volume: 0.0,
///     centrality: 0.0,
/// };
/// let institutions = vec![bank("A"), bank("B"), bank("C")];
/// let exposures = vec![Exposure::new("B", "A", 60.0)];
///
/// let simulator = CascadeSimulator::new(&institutions, &exposures);
/// let result = simulator.simulate(&"A".into(), 1.0).unwrap();
/// assert_eq!(result.failure_rounds.len(), 2);
/// assert_eq!(result.total_loss, 200.0);
///
/// // Runs are independent
/// let again = simulator.simulate(&"A".into(), 0.1).unwrap();
/// assert_eq!(again.depth, 0);
/// ```
#[derive(Debug, Clone)]
pub struct CascadeSimulator<'a> {
    institutions: &'a [Institution],
    index: HashMap<&'a InstitutionId, usize>,
    /// `creditors_of[debtor]` = (creditor, amount) for every usable edge
    creditors_of: Vec<Vec<(usize, f64)>>,
    total_assets: f64,
}

impl<'a> CascadeSimulator<'a> {
    /// Indexes the snapshot.
    ///
    /// Edges with an unknown endpoint, self-loops, and non-positive or
    /// non-finite amounts cannot move equity and are skipped. If an id
    /// appears twice, the first record is used.
    pub fn new(institutions: &'a [Institution], exposures: &[Exposure]) -> Self {
        let mut index = HashMap::with_capacity(institutions.len());
        for (idx, inst) in institutions.iter().enumerate() {
            index.entry(&inst.id).or_insert(idx);
        }

        let mut creditors_of = vec![Vec::new(); institutions.len()];
        let mut skipped = 0usize;
        for edge in exposures {
            let endpoints = index
                .get(&edge.source)
                .copied()
                .zip(index.get(&edge.target).copied());
            match endpoints {
                Some((creditor, debtor))
                    if creditor != debtor && edge.amount.is_finite() && edge.amount > 0.0 =>
                {
                    creditors_of[debtor].push((creditor, edge.amount));
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "Exposure edges ignored by cascade simulator");
        }

        Self {
            institutions,
            index,
            creditors_of,
            total_assets: institutions.iter().map(|inst| inst.total_assets).sum(),
        }
    }

    /// Runs a cascade triggered by the failure of `start_id`.
    ///
    /// # Errors
    ///
    /// - `CascadeError::InvalidLossGivenDefault` if `lgd` is outside [0, 1]
    /// - `CascadeError::UnknownStartInstitution` if `start_id` is not in the
    ///   snapshot
    ///
    /// Both are checked before any round executes.
    pub fn simulate(&self, start_id: &InstitutionId, lgd: f64) -> Result<CascadeResult, CascadeError> {
        if !(0.0..=1.0).contains(&lgd) {
            return Err(CascadeError::InvalidLossGivenDefault(lgd));
        }
        let start = *self
            .index
            .get(start_id)
            .ok_or_else(|| CascadeError::UnknownStartInstitution(start_id.to_string()))?;

        let mut state = SimulationState::new(self.institutions);
        state.mark_failed(start);

        let mut rounds: Vec<Vec<usize>> = vec![vec![start]];
        let mut depth = 0usize;
        // Per-round marker so each creditor is tested once per round
        let mut written_down = vec![false; self.institutions.len()];

        while depth < MAX_CASCADE_ROUNDS {
            let Some(previous) = rounds.last() else {
                break;
            };

            let mut touched = Vec::new();
            for &debtor in previous {
                for &(creditor, amount) in &self.creditors_of[debtor] {
                    if state.is_failed(creditor) {
                        continue;
                    }
                    let loss = amount * lgd;
                    if loss <= 0.0 {
                        continue;
                    }
                    state.apply_loss(creditor, loss);
                    if !written_down[creditor] {
                        written_down[creditor] = true;
                        touched.push(creditor);
                    }
                }
            }

            let mut newly_failed = Vec::new();
            for &idx in &touched {
                written_down[idx] = false;
                if state.equity(idx) <= 0.0 && state.mark_failed(idx) {
                    newly_failed.push(idx);
                }
            }

            if newly_failed.is_empty() {
                break;
            }
            depth += 1;
            debug!(
                round = depth,
                failures = newly_failed.len(),
                "Cascade round produced failures"
            );
            rounds.push(newly_failed);
        }

        let failure_rounds: Vec<Vec<InstitutionId>> = rounds
            .iter()
            .map(|round| {
                round
                    .iter()
                    .map(|&idx| self.institutions[idx].id.clone())
                    .collect()
            })
            .collect();
        let failed: BTreeSet<InstitutionId> = failure_rounds.iter().flatten().cloned().collect();
        let total_loss: f64 = rounds
            .iter()
            .flatten()
            .map(|&idx| self.institutions[idx].total_assets)
            .sum();
        let percent_wiped = if self.total_assets > 0.0 {
            total_loss / self.total_assets * 100.0
        } else {
            0.0
        };

        info!(
            start = %start_id,
            lgd,
            failed = failed.len(),
            depth,
            total_loss,
            "Cascade simulation complete"
        );

        Ok(CascadeResult {
            patient_zero: start_id.clone(),
            failure_rounds,
            failed,
            depth,
            total_loss,
            percent_wiped,
            lgd,
        })
    }
}

/// Runs one cascade over a snapshot.
///
/// Convenience wrapper building a [`CascadeSimulator`] for a single run.
///
/// # Errors
///
/// See [`CascadeSimulator::simulate`].
pub fn simulate(
    institutions: &[Institution],
    exposures: &[Exposure],
    start_id: &InstitutionId,
    lgd: f64,
) -> Result<CascadeResult, CascadeError> {
    CascadeSimulator::new(institutions, exposures).simulate(start_id, lgd)
}
