//! Canonical domain types.
//!
//! This module provides:
//! - `ids`: Strongly-typed institution identifiers
//! - `institution`: The `Institution` record with its classification and sector
//! - `exposure`: Directed creditor → debtor `Exposure` edges
//! - `market`: The `MarketSnapshot` selected for a reference date
//! - `prediction`: Time-indexed crisis `Prediction` points
//! - `error`: Parse errors for the enumerated attributes

pub mod error;
pub mod exposure;
pub mod ids;
pub mod institution;
pub mod market;
pub mod prediction;

pub use error::TypeError;
pub use exposure::Exposure;
pub use ids::InstitutionId;
pub use institution::{Classification, Institution, Sector};
pub use market::MarketSnapshot;
pub use prediction::Prediction;
