//! Prediction Series Builder.
//!
//! Crisis probability and severity over time. Only the reference date gets
//! the data-driven systemic index; every other point gets a probability
//! drawn from a band conditioned on its crisis label.

mod series;

pub use series::{
    build_series, predictions_from_labels, PredictionSeries,
    CALM_PROBABILITY, CALM_SEVERITY, CRISIS_PROBABILITY, CRISIS_SEVERITY,
};
