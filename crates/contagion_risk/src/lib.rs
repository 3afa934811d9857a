//! # Contagion Risk (L2: Engine)
//!
//! Systemic risk scoring and default-cascade simulation over an
//! institution exposure network.
//!
//! This crate provides:
//! - Per-institution risk scores and the system-wide risk index
//! - Gross exposure volume and counterparty centrality per institution
//! - Normalisation of raw metric, network, market and label tables into a
//!   single reference-date snapshot
//! - Round-by-round insolvency propagation (Furfine-style cascade)
//! - Crisis probability series and systemic-importance rankings
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           contagion_risk (L2)           │
//! ├─────────────────────────────────────────┤
//! │  scoring/    - Risk score, systemic idx │
//! │  network/    - Volume, centrality       │
//! │  normaliser/ - Raw rows → snapshot      │
//! │  cascade/    - Simulator, rankings      │
//! │  prediction/ - Crisis probability path  │
//! │  report/     - Exporter summaries       │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           contagion_core (L1)           │
//! │  Ids, records, raw rows, noise source   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use contagion_core::{Exposure, MetricsRow, NoiseRng};
//! use contagion_risk::cascade::simulate;
//! use contagion_risk::normaliser::{normalise_tables, DatasetTables};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! let metrics = vec![
//!     MetricsRow::new(date, "A").with_total_assets(100.0).with_leverage_ratio(10.0),
//!     MetricsRow::new(date, "B").with_total_assets(100.0).with_leverage_ratio(10.0),
//! ];
//!
//! let tables = DatasetTables {
//!     metrics: &metrics,
//!     exposures: &[],
//!     market: &[],
//!     labels: &[],
//! };
//! let mut rng = NoiseRng::from_seed(42);
//! let snapshot = normalise_tables(tables, &mut rng).unwrap();
//!
//! // B lent 60 to A
//! let exposures = vec![Exposure::new("B", "A", 60.0)];
//! let result = simulate(&snapshot.institutions, &exposures, &"A".into(), 1.0).unwrap();
//!
//! assert_eq!(result.failed_count(), 2);
//! assert_eq!(result.depth, 1);
//! assert_eq!(result.total_loss, 200.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cascade;
pub mod network;
pub mod normaliser;
pub mod prediction;
pub mod report;
pub mod scoring;

// Re-export commonly used types
pub use cascade::{
    rank_systemic_importance, simulate, CascadeError, CascadeResult, CascadeSimulator,
    SystemicRanking, MAX_CASCADE_ROUNDS,
};
pub use network::{aggregate, NetworkMetrics};
pub use normaliser::{normalise, normalise_tables, DatasetError, DatasetTables, NormalisedDataset, RawDataset};
pub use prediction::{build_series, predictions_from_labels, PredictionSeries};
pub use report::{headline_probability, CascadeReport, FailedInstitution, NarrativeContext};
pub use scoring::{
    risk_score, systemic_risk_index, RiskScoreBreakdown, RiskStatus, SystemicComponents,
    SystemicRiskIndex, SYSTEMIC_RISK_FALLBACK,
};
