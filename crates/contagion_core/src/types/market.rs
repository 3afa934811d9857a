//! Market snapshot for a reference date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Market conditions used by the risk scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Date of the market row, `None` when no market data existed
    pub date: Option<NaiveDate>,
    /// Market volatility index
    pub vix: f64,
    /// Yield-curve slope, if reported
    #[serde(default)]
    pub yield_curve_slope: Option<f64>,
    /// GDP growth, if reported
    #[serde(default)]
    pub gdp_growth: Option<f64>,
}

impl MarketSnapshot {
    /// Volatility assumed when no market data is available.
    pub const DEFAULT_VIX: f64 = 25.0;

    /// Snapshot with only a volatility reading.
    pub fn with_vix(vix: f64) -> Self {
        Self {
            date: None,
            vix,
            yield_curve_slope: None,
            gdp_growth: None,
        }
    }
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self::with_vix(Self::DEFAULT_VIX)
    }
}
