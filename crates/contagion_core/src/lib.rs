//! # contagion_core: Foundation Types for the Contagion Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! contagion_core is the bottom layer of the workspace, providing:
//! - Strongly-typed identifiers: `InstitutionId` (`types::ids`)
//! - Canonical domain records: `Institution`, `Exposure`, `MarketSnapshot`,
//!   `Prediction` (`types`)
//! - Raw input table rows with field-level defaults (`records`)
//! - A seedable noise source for the randomised components (`rng`)
//!
//! Layer 1 has no dependencies on other contagion_* crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use contagion_core::records::MetricsRow;
//! use contagion_core::types::InstitutionId;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let row = MetricsRow::new(date, InstitutionId::new("BANK_001"))
//!     .with_total_assets(1_250.0)
//!     .with_leverage_ratio(12.5);
//!
//! // Missing fields fall back to their documented defaults
//! assert_eq!(row.leverage_ratio_or_default(), 12.5);
//! assert_eq!(row.liquidity_ratio_or_default(), 1.0);
//! assert_eq!(row.cds_spread_or_default(), 100.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod records;
pub mod rng;
pub mod types;

pub use records::{ExposureRow, LabelRow, MarketRow, MetricsRow};
pub use rng::NoiseRng;
pub use types::{
    Classification, Exposure, Institution, InstitutionId, MarketSnapshot, Prediction, Sector,
    TypeError,
};
