//! Per-institution weighted risk score.
//!
//! Each sub-score is a capped ratio multiplied by a fixed weight, so no single
//! input can push the score past its own weight:
//!
//! | Component  | Ratio                     | Weight |
//! |------------|---------------------------|--------|
//! | Leverage   | min(leverage / 40, 1)     | 40     |
//! | Liquidity  | max(0, 1.2 - liquidity)   | 30     |
//! | CDS spread | min(cds / 1000, 1)        | 20     |
//! | Volatility | min(vix / 60, 1)          | 10     |

use contagion_core::records::{defaults, non_negative_or, positive_or};
use contagion_core::{MarketSnapshot, MetricsRow};
use serde::Serialize;

const LEVERAGE_CAP: f64 = 40.0;
const LEVERAGE_WEIGHT: f64 = 40.0;
const LIQUIDITY_FLOOR: f64 = 1.2;
const LIQUIDITY_WEIGHT: f64 = 30.0;
const CDS_CAP: f64 = 1000.0;
const CDS_WEIGHT: f64 = 20.0;
const VIX_CAP: f64 = 60.0;
const VIX_WEIGHT: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;

/// Raw inputs to the risk score. `None` means absent or non-numeric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RiskScoreInputs {
    /// Leverage ratio (default 15)
    pub leverage_ratio: Option<f64>,
    /// Liquidity ratio (default 1)
    pub liquidity_ratio: Option<f64>,
    /// CDS spread in bps (default 100)
    pub cds_spread: Option<f64>,
}

impl From<&MetricsRow> for RiskScoreInputs {
    fn from(row: &MetricsRow) -> Self {
        Self {
            leverage_ratio: row.leverage_ratio,
            liquidity_ratio: row.liquidity_ratio,
            cds_spread: row.cds_spread,
        }
    }
}

/// Weighted sub-scores making up a risk score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskScoreBreakdown {
    /// Leverage contribution in [0, 40]
    pub leverage: f64,
    /// Liquidity contribution in [0, 36]
    pub liquidity: f64,
    /// CDS contribution in [0, 20]
    pub cds: f64,
    /// Volatility contribution in [0, 10]
    pub volatility: f64,
}

impl RiskScoreBreakdown {
    /// Computes the sub-scores, resolving invalid inputs to their defaults.
    pub fn compute(inputs: &RiskScoreInputs, market: &MarketSnapshot) -> Self {
        let leverage = positive_or(inputs.leverage_ratio, defaults::LEVERAGE_RATIO);
        let liquidity = non_negative_or(inputs.liquidity_ratio, defaults::LIQUIDITY_RATIO);
        let cds = non_negative_or(inputs.cds_spread, defaults::CDS_SPREAD);
        let vix = non_negative_or(Some(market.vix), defaults::VIX);

        Self {
            leverage: (leverage / LEVERAGE_CAP).min(1.0) * LEVERAGE_WEIGHT,
            liquidity: (LIQUIDITY_FLOOR - liquidity).max(0.0) * LIQUIDITY_WEIGHT,
            cds: (cds / CDS_CAP).min(1.0) * CDS_WEIGHT,
            volatility: (vix / VIX_CAP).min(1.0) * VIX_WEIGHT,
        }
    }

    /// Sum of the sub-scores clamped into [0, 100]; 0 if not finite.
    pub fn total(&self) -> f64 {
        let sum = self.leverage + self.liquidity + self.cds + self.volatility;
        if sum.is_finite() {
            sum.clamp(0.0, MAX_SCORE)
        } else {
            0.0
        }
    }
}

/// Risk score in [0, 100] for one institution under a market snapshot.
///
/// # Examples
///
/// ```
/// use contagion_core::MarketSnapshot;
/// use contagion_risk::scoring::{risk_score, RiskScoreInputs};
///
/// // All inputs missing: 15/40*40 + 0.2*30 + 0.1*20 + 25/60*10
/// let score = risk_score(&RiskScoreInputs::default(), &MarketSnapshot::default());
/// assert!((score - 27.1667).abs() < 1e-3);
/// ```
pub fn risk_score(inputs: &RiskScoreInputs, market: &MarketSnapshot) -> f64 {
    RiskScoreBreakdown::compute(inputs, market).total()
}
