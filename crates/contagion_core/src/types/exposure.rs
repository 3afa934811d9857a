//! Directed exposure edges between institutions.

use serde::{Deserialize, Serialize};

use super::ids::InstitutionId;

/// Directed edge: `source` (creditor) has lent `amount` to `target` (debtor).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Creditor institution
    pub source: InstitutionId,
    /// Debtor institution
    pub target: InstitutionId,
    /// Notional amount in currency units (>= 0)
    pub amount: f64,
    /// Collateral posted against the exposure, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<f64>,
}

impl Exposure {
    /// Creates an uncollateralised exposure.
    pub fn new(source: impl Into<InstitutionId>, target: impl Into<InstitutionId>, amount: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            amount,
            collateral: None,
        }
    }

    /// Attaches a collateral value.
    pub fn with_collateral(mut self, collateral: f64) -> Self {
        self.collateral = Some(collateral);
        self
    }

    /// Returns true when creditor and debtor are the same institution.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
