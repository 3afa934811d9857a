//! Dataset Normalizer.
//!
//! Joins the raw metrics, exposure, market and label tables for a single
//! reference date into a consistent institution + exposure snapshot,
//! scoring every institution and building the prediction series.

mod dataset;
mod error;
mod names;

pub use dataset::{normalise, normalise_tables, DatasetTables, NormalisedDataset, RawDataset};
pub use error::DatasetError;
pub use names::{display_name, NAME_PREFIXES};
