//! Institution records.
//!
//! An [`Institution`] is the canonical, immutable view of one entity on the
//! reference date: its balance-sheet metrics plus the derived risk score,
//! exposure volume and centrality. Simulations never mutate it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::TypeError;
use super::ids::InstitutionId;

/// Regulatory classification of an institution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Global systemically important bank
    #[serde(rename = "G-SIB")]
    GSib,
    /// Domestic systemically important bank
    #[serde(rename = "D-SIB")]
    DSib,
    /// Regional institution
    Regional,
    /// Investment firm
    Investment,
}

impl Classification {
    /// Total-assets threshold above which the fallback classification is G-SIB.
    pub const GSIB_ASSET_THRESHOLD: f64 = 1000.0;

    /// Fallback classification derived from balance-sheet size alone.
    #[inline]
    pub fn from_total_assets(total_assets: f64) -> Self {
        if total_assets > Self::GSIB_ASSET_THRESHOLD {
            Classification::GSib
        } else {
            Classification::Regional
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::GSib => "G-SIB",
            Classification::DSib => "D-SIB",
            Classification::Regional => "Regional",
            Classification::Investment => "Investment",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Classification {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G-SIB" | "GSIB" => Ok(Classification::GSib),
            "D-SIB" | "DSIB" => Ok(Classification::DSib),
            "REGIONAL" => Ok(Classification::Regional),
            "INVESTMENT" => Ok(Classification::Investment),
            _ => Err(TypeError::UnknownClassification(s.to_string())),
        }
    }
}

/// Business sector of an institution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Deposit-taking and lending
    Banking,
    /// Insurance and reinsurance
    Insurance,
    /// Fund and asset management
    #[serde(rename = "Asset Management")]
    AssetManagement,
}

impl Sector {
    /// All sectors in round-robin order.
    pub const ALL: [Sector; 3] = [Sector::Banking, Sector::Insurance, Sector::AssetManagement];

    /// Fallback sector for the row at `position`, cycling through [`Sector::ALL`].
    #[inline]
    pub fn round_robin(position: usize) -> Self {
        Self::ALL[position % Self::ALL.len()]
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Sector::Banking => "Banking",
            Sector::Insurance => "Insurance",
            Sector::AssetManagement => "Asset Management",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "banking" => Ok(Sector::Banking),
            "insurance" => Ok(Sector::Insurance),
            "asset management" => Ok(Sector::AssetManagement),
            _ => Err(TypeError::UnknownSector(s.to_string())),
        }
    }
}

/// A financial institution on the reference date.
///
/// All numeric fields have already been resolved against their defaults,
/// so every value here is finite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Stable institution key
    pub id: InstitutionId,
    /// Display name
    pub name: String,
    /// Regulatory classification
    pub classification: Classification,
    /// Business sector
    pub sector: Sector,
    /// Total assets in currency units (>= 0)
    pub total_assets: f64,
    /// Leverage ratio, assets over equity (> 0)
    pub leverage_ratio: f64,
    /// Liquidity ratio (>= 0)
    pub liquidity_ratio: f64,
    /// Return on equity
    pub roe: f64,
    /// Credit-default-swap spread in basis points (>= 0)
    pub cds_spread: f64,
    /// Derived risk score in [0, 100]
    pub risk_score: f64,
    /// Gross exposure volume through this institution (>= 0)
    pub exposure_volume: f64,
    /// Normalised counterparty-count centrality in [0, 1]
    pub centrality: f64,
}

impl Institution {
    /// Leverage used when the recorded ratio is unset or non-positive.
    pub const FALLBACK_LEVERAGE: f64 = 15.0;

    /// Leverage ratio with the equity fallback applied.
    #[inline]
    pub fn effective_leverage(&self) -> f64 {
        if self.leverage_ratio.is_finite() && self.leverage_ratio > 0.0 {
            self.leverage_ratio
        } else {
            Self::FALLBACK_LEVERAGE
        }
    }

    /// Book equity implied by assets and leverage.
    ///
    /// # Examples
    ///
    /// ```
    /// use contagion_core::types::{Classification, Institution, InstitutionId, Sector};
    ///
    /// let bank = Institution {
    ///     id: InstitutionId::new("B1"),
    ///     name: "Bank One".to_string(),
    ///     classification: Classification::Regional,
    ///     sector: Sector::Banking,
    ///     total_assets: 100.0,
    ///     leverage_ratio: 10.0,
    ///     liquidity_ratio: 1.0,
    ///     roe: 0.08,
    ///     cds_spread: 90.0,
    ///     risk_score: 0.0,
    ///     exposure_volume: 0.0,
    ///     centrality: 0.0,
    /// };
    /// assert_eq!(bank.equity(), 10.0);
    /// ```
    #[inline]
    pub fn equity(&self) -> f64 {
        self.total_assets / self.effective_leverage()
    }
}
