//! Cascade outcome.

use contagion_core::InstitutionId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of one cascade run.
///
/// `failure_rounds[0]` is always the trigger alone; every later entry holds
/// the institutions that newly failed in that round. An institution appears
/// in exactly one round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CascadeResult {
    /// Institution whose failure triggered the cascade
    pub patient_zero: InstitutionId,
    /// Newly failed institutions per round, round 0 first
    pub failure_rounds: Vec<Vec<InstitutionId>>,
    /// Every failed institution
    pub failed: BTreeSet<InstitutionId>,
    /// Rounds beyond round 0 that produced failures
    pub depth: usize,
    /// Sum of total assets over failed institutions
    pub total_loss: f64,
    /// `total_loss` as a percentage of all assets in the snapshot
    pub percent_wiped: f64,
    /// Loss given default used for the run
    pub lgd: f64,
}

impl CascadeResult {
    /// Number of failed institutions, trigger included.
    #[inline]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Rounds executed that produced failures, round 0 included.
    #[inline]
    pub fn rounds_executed(&self) -> usize {
        self.failure_rounds.len()
    }

    /// Returns true if `id` failed during the run.
    #[inline]
    pub fn contains(&self, id: &InstitutionId) -> bool {
        self.failed.contains(id)
    }

    /// The round in which `id` failed.
    pub fn round_of(&self, id: &InstitutionId) -> Option<usize> {
        self.failure_rounds
            .iter()
            .position(|round| round.contains(id))
    }

    /// Returns true if the cascade stopped at the trigger.
    #[inline]
    pub fn is_contained(&self) -> bool {
        self.depth == 0
    }
}
