//! Label-conditioned prediction series.

use chrono::{Months, NaiveDate};
use contagion_core::{LabelRow, NoiseRng, Prediction};
use std::collections::HashMap;
use std::ops::Range;

/// Probability band for crisis-flagged dates.
pub const CRISIS_PROBABILITY: Range<f64> = 0.65..0.75;
/// Probability band for calm dates.
pub const CALM_PROBABILITY: Range<f64> = 0.25..0.35;
/// Severity band for crisis-flagged dates without a recorded severity.
pub const CRISIS_SEVERITY: Range<f64> = 7.0..9.0;
/// Severity band for calm dates without a recorded severity.
pub const CALM_SEVERITY: Range<f64> = 3.0..5.0;

fn draw(rng: &mut NoiseRng, band: &Range<f64>) -> f64 {
    rng.uniform(band.start, band.end)
}

fn point(
    timestamp: NaiveDate,
    label: Option<&LabelRow>,
    risk_index: f64,
    reference_date: NaiveDate,
    rng: &mut NoiseRng,
) -> Prediction {
    let crisis = label.is_some_and(LabelRow::crisis);
    let probability = if timestamp == reference_date {
        risk_index
    } else if crisis {
        draw(rng, &CRISIS_PROBABILITY)
    } else {
        draw(rng, &CALM_PROBABILITY)
    };
    let severity = match label.and_then(LabelRow::severity) {
        Some(recorded) => recorded,
        None if crisis => draw(rng, &CRISIS_SEVERITY),
        None => draw(rng, &CALM_SEVERITY),
    };
    Prediction::new(timestamp, probability, severity)
}

/// One prediction per label row, in row order.
///
/// # Examples
///
/// ```
/// use contagion_core::{LabelRow, NoiseRng};
/// use contagion_risk::prediction::predictions_from_labels;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let labels = vec![
///     LabelRow::new(NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(), true, None),
///     LabelRow::new(reference, false, Some(4.0)),
/// ];
/// let mut rng = NoiseRng::from_seed(3);
/// let series = predictions_from_labels(&labels, 0.58, reference, &mut rng);
///
/// assert!((0.65..0.75).contains(&series[0].probability));
/// assert_eq!(series[1].probability, 0.58);
/// assert_eq!(series[1].severity, 4.0);
/// ```
pub fn predictions_from_labels(
    labels: &[LabelRow],
    risk_index: f64,
    reference_date: NaiveDate,
    rng: &mut NoiseRng,
) -> Vec<Prediction> {
    labels
        .iter()
        .map(|label| point(label.date, Some(label), risk_index, reference_date, rng))
        .collect()
}

/// Monthly prediction series starting at the reference date.
///
/// Yields at most `horizon_months` points, one per month offset
/// `0..horizon_months`. It consumes noise as it goes and cannot be rewound.
pub struct PredictionSeries<'a> {
    labels: HashMap<NaiveDate, &'a LabelRow>,
    risk_index: f64,
    reference_date: NaiveDate,
    horizon_months: u32,
    offset: u32,
    rng: &'a mut NoiseRng,
}

impl<'a> PredictionSeries<'a> {
    /// Creates the series. Later label rows for the same date win.
    pub fn new(
        labels: &'a [LabelRow],
        risk_index: f64,
        reference_date: NaiveDate,
        horizon_months: u32,
        rng: &'a mut NoiseRng,
    ) -> Self {
        Self {
            labels: labels.iter().map(|label| (label.date, label)).collect(),
            risk_index,
            reference_date,
            horizon_months,
            offset: 0,
            rng,
        }
    }
}

impl Iterator for PredictionSeries<'_> {
    type Item = Prediction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.horizon_months {
            return None;
        }
        let Some(timestamp) = self
            .reference_date
            .checked_add_months(Months::new(self.offset))
        else {
            // Past the end of the calendar; nothing further can be produced
            self.offset = self.horizon_months;
            return None;
        };
        self.offset += 1;
        let label = self.labels.get(&timestamp).copied();
        Some(point(
            timestamp,
            label,
            self.risk_index,
            self.reference_date,
            self.rng,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.horizon_months.saturating_sub(self.offset) as usize;
        (0, Some(remaining))
    }
}

/// Collects a [`PredictionSeries`] of `horizon_months` points.
pub fn build_series(
    labels: &[LabelRow],
    risk_index: f64,
    reference_date: NaiveDate,
    horizon_months: u32,
    rng: &mut NoiseRng,
) -> Vec<Prediction> {
    PredictionSeries::new(labels, risk_index, reference_date, horizon_months, rng).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_date_uses_risk_index() {
        let reference = ymd(2024, 6, 1);
        let labels = vec![LabelRow::new(reference, true, None)];
        let mut rng = NoiseRng::from_seed(1);
        let p = predictions_from_labels(&labels, 0.42, reference, &mut rng);
        assert_eq!(p[0].probability, 0.42);
        assert!(CRISIS_SEVERITY.contains(&p[0].severity));
    }

    #[test]
    fn test_bands_by_label() {
        let reference = ymd(2024, 6, 1);
        let labels = vec![
            LabelRow::new(ymd(2024, 1, 1), true, None),
            LabelRow::new(ymd(2024, 2, 1), false, None),
        ];
        let mut rng = NoiseRng::from_seed(2);
        for _ in 0..100 {
            let p = predictions_from_labels(&labels, 0.5, reference, &mut rng);
            assert!(CRISIS_PROBABILITY.contains(&p[0].probability));
            assert!(CRISIS_SEVERITY.contains(&p[0].severity));
            assert!(CALM_PROBABILITY.contains(&p[1].probability));
            assert!(CALM_SEVERITY.contains(&p[1].severity));
        }
    }

    #[test]
    fn test_recorded_severity_is_clamped() {
        let reference = ymd(2024, 6, 1);
        let labels = vec![LabelRow::new(ymd(2024, 1, 1), true, Some(14.0))];
        let mut rng = NoiseRng::from_seed(2);
        let p = predictions_from_labels(&labels, 0.5, reference, &mut rng);
        assert_eq!(p[0].severity, 10.0);
    }

    #[test]
    fn test_series_length_and_timestamps() {
        let reference = ymd(2024, 1, 31);
        let mut rng = NoiseRng::from_seed(4);
        let series = build_series(&[], 0.61, reference, 4, &mut rng);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].timestamp, reference);
        assert_eq!(series[0].probability, 0.61);
        assert_eq!(series[1].timestamp, ymd(2024, 2, 29));
        assert_eq!(series[3].timestamp, ymd(2024, 4, 30));
        for p in &series[1..] {
            assert!(CALM_PROBABILITY.contains(&p.probability));
        }
    }

    #[test]
    fn test_series_uses_matching_labels() {
        let reference = ymd(2024, 1, 1);
        let labels = vec![LabelRow::new(ymd(2024, 3, 1), true, Some(8.2))];
        let mut rng = NoiseRng::from_seed(4);
        let series = build_series(&labels, 0.3, reference, 3, &mut rng);
        assert!(CRISIS_PROBABILITY.contains(&series[2].probability));
        assert_eq!(series[2].severity, 8.2);
    }

    #[test]
    fn test_series_not_restartable() {
        let mut rng = NoiseRng::from_seed(4);
        let mut series = PredictionSeries::new(&[], 0.3, ymd(2024, 1, 1), 2, &mut rng);
        assert!(series.next().is_some());
        assert!(series.next().is_some());
        assert!(series.next().is_none());
        assert!(series.next().is_none());
    }

    #[test]
    fn test_zero_horizon() {
        let mut rng = NoiseRng::from_seed(4);
        assert!(build_series(&[], 0.3, ymd(2024, 1, 1), 0, &mut rng).is_empty());
    }

    proptest! {
        #[test]
        fn test_predictions_always_in_range(
            seed in any::<u64>(),
            risk_index in -2.0f64..3.0,
            severities in prop::collection::vec(prop::option::of(-50.0f64..50.0), 0..24),
        ) {
            let reference = ymd(2024, 1, 1);
            let labels: Vec<LabelRow> = severities
                .iter()
                .enumerate()
                .map(|(i, s)| LabelRow::new(ymd(2023, 1 + (i % 12) as u32, 1), i % 3 == 0, *s))
                .collect();
            let mut rng = NoiseRng::from_seed(seed);
            let mut all = predictions_from_labels(&labels, risk_index, reference, &mut rng);
            all.extend(build_series(&labels, risk_index, reference, 12, &mut rng));
            for p in all {
                prop_assert!((0.0..=1.0).contains(&p.probability));
                prop_assert!((0.0..=10.0).contains(&p.severity));
            }
        }
    }
}
