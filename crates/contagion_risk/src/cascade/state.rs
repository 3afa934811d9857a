//! Per-run simulation state.
//!
//! An index-based arena parallel to the institution slice. Each run builds
//! its own state, so the canonical `Institution` records are never mutated
//! and concurrent runs share nothing mutable.

use contagion_core::Institution;

/// Solvency of an institution during a run. `Failed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SolvencyState {
    /// Equity still positive or not yet written down to zero
    Solvent,
    /// Insolvent; never recovers
    Failed,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    equity: f64,
    state: SolvencyState,
}

/// Equity and solvency per institution, indexed like the institution slice.
#[derive(Clone, Debug)]
pub(crate) struct SimulationState {
    slots: Vec<Slot>,
}

impl SimulationState {
    /// Initial state: every institution solvent with equity = assets / leverage.
    pub(crate) fn new(institutions: &[Institution]) -> Self {
        Self {
            slots: institutions
                .iter()
                .map(|inst| Slot {
                    equity: inst.equity(),
                    state: SolvencyState::Solvent,
                })
                .collect(),
        }
    }

    /// Remaining equity of institution `idx`.
    #[inline]
    pub(crate) fn equity(&self, idx: usize) -> f64 {
        self.slots[idx].equity
    }

    /// Returns true if institution `idx` has failed.
    #[inline]
    pub(crate) fn is_failed(&self, idx: usize) -> bool {
        self.slots[idx].state == SolvencyState::Failed
    }

    /// Writes `loss` off the equity of institution `idx`.
    #[inline]
    pub(crate) fn apply_loss(&mut self, idx: usize, loss: f64) {
        self.slots[idx].equity -= loss;
    }

    /// Marks institution `idx` failed. Returns false if it already was.
    #[inline]
    pub(crate) fn mark_failed(&mut self, idx: usize) -> bool {
        let slot = &mut self.slots[idx];
        let newly = slot.state == SolvencyState::Solvent;
        slot.state = SolvencyState::Failed;
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contagion_core::{Classification, InstitutionId, Sector};

    fn inst(id: &str, total_assets: f64, leverage_ratio: f64) -> Institution {
        Institution {
            id: InstitutionId::new(id),
            name: id.to_string(),
            classification: Classification::Regional,
            sector: Sector::Banking,
            total_assets,
            leverage_ratio,
            liquidity_ratio: 1.0,
            roe: 0.0,
            cds_spread: 100.0,
            risk_score: 0.0,
            exposure_volume: 0.0,
            centrality: 0.0,
        }
    }

    #[test]
    fn test_initial_equity() {
        let state = SimulationState::new(&[inst("A", 100.0, 10.0), inst("B", 300.0, 0.0)]);
        assert_eq!(state.equity(0), 10.0);
        assert_eq!(state.equity(1), 20.0);
        assert!(!state.is_failed(0));
        assert!(!state.is_failed(1));
    }

    #[test]
    fn test_mark_failed_once() {
        let mut state = SimulationState::new(&[inst("A", 100.0, 10.0)]);
        assert!(state.mark_failed(0));
        assert!(!state.mark_failed(0));
        assert!(state.is_failed(0));
        assert_eq!(state.equity(0), 10.0);
    }

    #[test]
    fn test_apply_loss() {
        let mut state = SimulationState::new(&[inst("A", 100.0, 10.0)]);
        state.apply_loss(0, 4.0);
        state.apply_loss(0, 7.0);
        assert_eq!(state.equity(0), -1.0);
    }
}
