//! Risk Index Calculator.
//!
//! Two bounded scores:
//! - [`risk_score`]: per-institution score in [0, 100] from leverage,
//!   liquidity, CDS spread and market volatility
//! - [`systemic_risk_index`]: system-wide index in [0, 1] from average
//!   leverage, average CDS spread and volatility, with a live-feed jitter

mod risk_score;
mod systemic;

pub use risk_score::{risk_score, RiskScoreBreakdown, RiskScoreInputs};
pub use systemic::{
    systemic_components, systemic_risk_index, RiskStatus, SystemicComponents, SystemicRiskIndex,
    CRITICAL_THRESHOLD, LIVE_PULSE_JITTER, SYSTEMIC_RISK_FALLBACK,
};
