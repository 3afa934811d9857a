//! Crisis prediction points.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Crisis probability and severity at one point in time.
///
/// Construction through [`Prediction::new`] clamps both values into range,
/// so a surfaced prediction is always within bounds.
///
/// # Examples
///
/// ```
/// use contagion_core::types::Prediction;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let p = Prediction::new(date, 1.4, -2.0);
/// assert_eq!(p.probability, 1.0);
/// assert_eq!(p.severity, 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Point in time
    pub timestamp: NaiveDate,
    /// Crisis probability in [0, 1]
    pub probability: f64,
    /// Crisis severity in [0, 10]
    pub severity: f64,
}

impl Prediction {
    /// Upper bound of the severity scale.
    pub const MAX_SEVERITY: f64 = 10.0;

    /// Creates a prediction, clamping probability and severity.
    ///
    /// Non-finite inputs collapse to 0.
    pub fn new(timestamp: NaiveDate, probability: f64, severity: f64) -> Self {
        Self {
            timestamp,
            probability: clamp_finite(probability, 1.0),
            severity: clamp_finite(severity, Self::MAX_SEVERITY),
        }
    }
}

fn clamp_finite(value: f64, upper: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, upper)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_in_range_values_untouched() {
        let p = Prediction::new(date(), 0.31, 4.2);
        assert_eq!(p.probability, 0.31);
        assert_eq!(p.severity, 4.2);
    }

    #[test]
    fn test_clamping() {
        let p = Prediction::new(date(), -0.5, 12.0);
        assert_eq!(p.probability, 0.0);
        assert_eq!(p.severity, 10.0);
    }

    #[test]
    fn test_non_finite() {
        let p = Prediction::new(date(), f64::NAN, f64::INFINITY);
        assert_eq!(p.probability, 0.0);
        assert_eq!(p.severity, 0.0);
    }
}
