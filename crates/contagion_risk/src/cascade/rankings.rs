//! Systemic-importance rankings.
//!
//! Each of the largest institutions in turn is used as the trigger of a
//! full cascade. Institutions are then ranked by the total assets wiped out
//! by their failure.

use contagion_core::{Exposure, Institution, InstitutionId};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::info;

use super::error::CascadeError;
use super::simulator::CascadeSimulator;

/// Number of triggers evaluated when no size is given.
pub const DEFAULT_RANKING_SIZE: usize = 50;

/// Cascade outcome for one trigger.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemicRanking {
    /// Trigger institution
    pub institution_id: InstitutionId,
    /// Trigger display name
    pub name: String,
    /// Total assets of every institution failed by the cascade
    pub potential_loss: f64,
    /// Number of failed institutions, trigger included
    pub cascade_size: usize,
}

/// Ranks the `top_n` largest institutions by their cascade loss.
///
/// Candidates are the `top_n` institutions by total assets (ties broken by
/// id). The returned list is ordered by `potential_loss` descending, ties
/// broken by id ascending. Cascades run in parallel against one shared
/// [`CascadeSimulator`].
///
/// # Errors
///
/// `CascadeError::InvalidLossGivenDefault` if `lgd` is outside [0, 1].
pub fn rank_systemic_importance(
    institutions: &[Institution],
    exposures: &[Exposure],
    lgd: f64,
    top_n: usize,
) -> Result<Vec<SystemicRanking>, CascadeError> {
    if !(0.0..=1.0).contains(&lgd) {
        return Err(CascadeError::InvalidLossGivenDefault(lgd));
    }

    let mut seen = HashSet::new();
    let mut candidates: Vec<&Institution> = institutions
        .iter()
        .filter(|inst| seen.insert(&inst.id))
        .collect();
    candidates.sort_by(|a, b| {
        b.total_assets
            .partial_cmp(&a.total_assets)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.truncate(top_n);

    let simulator = CascadeSimulator::new(institutions, exposures);
    let mut rankings = candidates
        .par_iter()
        .map(|inst| -> Result<SystemicRanking, CascadeError> {
            let result = simulator.simulate(&inst.id, lgd)?;
            Ok(SystemicRanking {
                institution_id: inst.id.clone(),
                name: inst.name.clone(),
                potential_loss: result.total_loss,
                cascade_size: result.failed_count(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rankings.sort_by(|a, b| {
        b.potential_loss
            .partial_cmp(&a.potential_loss)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.institution_id.cmp(&b.institution_id))
    });

    info!(
        candidates = rankings.len(),
        lgd, "Systemic importance ranking complete"
    );
    Ok(rankings)
}
