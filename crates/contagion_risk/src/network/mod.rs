//! Network Aggregator.
//!
//! Per-institution gross exposure volume and a normalised-degree centrality
//! proxy computed from the exposure edges of one reference date.

mod aggregator;

pub use aggregator::{aggregate, NetworkMetrics};
