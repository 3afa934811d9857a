//! System-wide systemic risk index.
//!
//! ```text
//! leverage_score = min(avg_leverage / 30, 1)
//! cds_score      = min(avg_cds / 600, 1)
//! vix_score      = min(vix / 50, 1)
//! index          = clamp(0.4 * leverage + 0.4 * cds + 0.2 * vix + jitter, 0, 1)
//! ```
//!
//! The index feeds a dashboard summary and is never undefined: an empty
//! institution set or a non-finite intermediate yields
//! [`SYSTEMIC_RISK_FALLBACK`].

use contagion_core::records::{defaults, non_negative_or};
use contagion_core::{Institution, MarketSnapshot, NoiseRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Index reported when it cannot be computed.
pub const SYSTEMIC_RISK_FALLBACK: f64 = 0.62;

/// Half-width of the symmetric live-feed jitter.
pub const LIVE_PULSE_JITTER: f64 = 0.0012;

/// Index values strictly above this are `Critical`.
pub const CRITICAL_THRESHOLD: f64 = 0.60;

const LEVERAGE_NORMALISER: f64 = 30.0;
const CDS_NORMALISER: f64 = 600.0;
const VIX_NORMALISER: f64 = 50.0;
const LEVERAGE_WEIGHT: f64 = 0.4;
const CDS_WEIGHT: f64 = 0.4;
const VIX_WEIGHT: f64 = 0.2;

/// Headline status of the systemic index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskStatus {
    /// Index above the critical threshold
    Critical,
    /// Index at or below the critical threshold
    Moderate,
}

impl RiskStatus {
    /// Status for an index value.
    #[inline]
    pub fn from_index(value: f64) -> Self {
        if value > CRITICAL_THRESHOLD {
            RiskStatus::Critical
        } else {
            RiskStatus::Moderate
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskStatus::Critical => write!(f, "CRITICAL"),
            RiskStatus::Moderate => write!(f, "MODERATE"),
        }
    }
}

/// Normalised sub-scores, each in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemicComponents {
    /// Average leverage over 30, capped at 1
    pub leverage: f64,
    /// Average CDS spread over 600 bps, capped at 1
    pub cds: f64,
    /// Volatility over 50, capped at 1
    pub volatility: f64,
}

impl SystemicComponents {
    /// Weighted sum of the components, before jitter.
    #[inline]
    pub fn base_index(&self) -> f64 {
        self.leverage * LEVERAGE_WEIGHT + self.cds * CDS_WEIGHT + self.volatility * VIX_WEIGHT
    }
}

/// The systemic risk index with its breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemicRiskIndex {
    /// Index value in [0, 1]
    pub value: f64,
    /// Headline status
    pub status: RiskStatus,
    /// Sub-scores the value was built from
    pub components: SystemicComponents,
    /// True when the fallback constant was reported
    pub fallback: bool,
}

impl SystemicRiskIndex {
    /// The fallback index.
    pub fn fallback() -> Self {
        Self {
            value: SYSTEMIC_RISK_FALLBACK,
            status: RiskStatus::Critical,
            components: SystemicComponents::default(),
            fallback: true,
        }
    }
}

/// Deterministic components of the index.
///
/// `None` for an empty institution set or when any intermediate is not
/// finite.
pub fn systemic_components(
    institutions: &[Institution],
    market: &MarketSnapshot,
) -> Option<SystemicComponents> {
    if institutions.is_empty() {
        return None;
    }
    let count = institutions.len() as f64;
    let avg_leverage = institutions
        .iter()
        .map(|inst| inst.leverage_ratio)
        .sum::<f64>()
        / count;
    let avg_cds = institutions.iter().map(|inst| inst.cds_spread).sum::<f64>() / count;
    let vix = non_negative_or(Some(market.vix), defaults::VIX);

    let components = SystemicComponents {
        leverage: capped(avg_leverage / LEVERAGE_NORMALISER)?,
        cds: capped(avg_cds / CDS_NORMALISER)?,
        volatility: capped(vix / VIX_NORMALISER)?,
    };
    components.base_index().is_finite().then_some(components)
}

fn capped(ratio: f64) -> Option<f64> {
    ratio.is_finite().then(|| ratio.clamp(0.0, 1.0))
}

/// Systemic risk index for the snapshot, with live-feed jitter.
///
/// # Examples
///
/// ```
/// use contagion_core::{MarketSnapshot, NoiseRng};
/// use contagion_risk::scoring::{systemic_risk_index, SYSTEMIC_RISK_FALLBACK};
///
/// let mut rng = NoiseRng::from_seed(1);
/// let index = systemic_risk_index(&[], &MarketSnapshot::default(), &mut rng);
/// assert_eq!(index.value, SYSTEMIC_RISK_FALLBACK);
/// assert!(index.fallback);
/// ```
pub fn systemic_risk_index(
    institutions: &[Institution],
    market: &MarketSnapshot,
    rng: &mut NoiseRng,
) -> SystemicRiskIndex {
    let Some(components) = systemic_components(institutions, market) else {
        if institutions.is_empty() {
            debug!("No institutions in snapshot, reporting fallback systemic index");
        } else {
            warn!(
                institutions = institutions.len(),
                "Systemic index not finite, reporting fallback"
            );
        }
        return SystemicRiskIndex::fallback();
    };

    let jitter = rng.symmetric(LIVE_PULSE_JITTER);
    let value = (components.base_index() + jitter).clamp(0.0, 1.0);
    debug!(
        base = components.base_index(),
        jitter, value, "Computed systemic risk index"
    );

    SystemicRiskIndex {
        value,
        status: RiskStatus::from_index(value),
        components,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use contagion_core::{Classification, InstitutionId, Sector};
    use proptest::prelude::*;

    fn inst(leverage_ratio: f64, cds_spread: f64) -> Institution {
        Institution {
            id: InstitutionId::new("B"),
            name: "Bank".to_string(),
            classification: Classification::Regional,
            sector: Sector::Banking,
            total_assets: 100.0,
            leverage_ratio,
            liquidity_ratio: 1.0,
            roe: 0.0,
            cds_spread,
            risk_score: 0.0,
            exposure_volume: 0.0,
            centrality: 0.0,
        }
    }

    #[test]
    fn test_components() {
        let institutions = vec![inst(10.0, 200.0), inst(20.0, 400.0)];
        let c = systemic_components(&institutions, &MarketSnapshot::with_vix(25.0)).unwrap();
        assert_relative_eq!(c.leverage, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.cds, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.volatility, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.base_index(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_components_capped() {
        let institutions = vec![inst(90.0, 5000.0)];
        let c = systemic_components(&institutions, &MarketSnapshot::with_vix(80.0)).unwrap();
        assert_eq!(c.leverage, 1.0);
        assert_eq!(c.cds, 1.0);
        assert_eq!(c.volatility, 1.0);
    }

    #[test]
    fn test_index_within_jitter_of_base() {
        let institutions = vec![inst(15.0, 300.0), inst(25.0, 500.0)];
        let market = MarketSnapshot::with_vix(30.0);
        let base = systemic_components(&institutions, &market).unwrap().base_index();
        let mut rng = NoiseRng::from_seed(99);
        for _ in 0..50 {
            let index = systemic_risk_index(&institutions, &market, &mut rng);
            assert!((index.value - base).abs() <= LIVE_PULSE_JITTER + 1e-12);
            assert!(!index.fallback);
        }
    }

    #[test]
    fn test_empty_set_falls_back() {
        let mut rng = NoiseRng::from_seed(5);
        let index = systemic_risk_index(&[], &MarketSnapshot::with_vix(40.0), &mut rng);
        assert_eq!(index, SystemicRiskIndex::fallback());
        assert_eq!(index.status, RiskStatus::Critical);
    }

    #[test]
    fn test_non_finite_falls_back() {
        let institutions = vec![inst(f64::NAN, 100.0)];
        let mut rng = NoiseRng::from_seed(5);
        let index = systemic_risk_index(&institutions, &MarketSnapshot::default(), &mut rng);
        assert_eq!(index.value, SYSTEMIC_RISK_FALLBACK);
    }

    #[test]
    fn test_status_threshold() {
        assert_eq!(RiskStatus::from_index(0.60), RiskStatus::Moderate);
        assert_eq!(RiskStatus::from_index(0.6001), RiskStatus::Critical);
        assert_eq!(RiskStatus::Critical.to_string(), "CRITICAL");
    }

    proptest! {
        #[test]
        fn test_index_bounded(
            seed in any::<u64>(),
            rows in prop::collection::vec((-100.0f64..200.0, -100.0f64..5000.0), 0..20),
            vix in -10.0f64..200.0,
        ) {
            let institutions: Vec<Institution> = rows.iter().map(|(l, c)| inst(*l, *c)).collect();
            let mut rng = NoiseRng::from_seed(seed);
            let index = systemic_risk_index(&institutions, &MarketSnapshot::with_vix(vix), &mut rng);
            prop_assert!((0.0..=1.0).contains(&index.value));
            if institutions.is_empty() {
                prop_assert_eq!(index.value, SYSTEMIC_RISK_FALLBACK);
            }
        }
    }
}
