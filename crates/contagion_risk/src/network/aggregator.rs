//! Gross volume and counterparty centrality.
//!
//! Every edge adds its amount to both endpoints (gross, not net). Centrality
//! is the number of distinct counterparties divided by the number of
//! institutions with at least one connection. This is a degree proxy, not
//! an eigenvector or PageRank centrality, and its scale is relied on by the
//! dashboard.

use chrono::NaiveDate;
use contagion_core::{ExposureRow, InstitutionId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Aggregated network metrics for one institution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NetworkMetrics {
    /// Sum of amounts over every edge touching the institution
    pub volume: f64,
    /// Distinct counterparties / institutions with at least one connection
    pub centrality: f64,
    /// Number of distinct counterparties
    pub connections: usize,
}

#[derive(Default)]
struct Accumulator<'a> {
    volume: f64,
    counterparties: HashSet<&'a InstitutionId>,
}

/// Aggregates exposure rows dated at `reference_date`.
///
/// Rows on other dates and self-loops are ignored. Institutions absent from
/// the result have volume 0 and centrality 0.
///
/// # Examples
///
/// ```
/// use contagion_core::{ExposureRow, InstitutionId};
/// use contagion_risk::network::aggregate;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let rows = vec![
///     ExposureRow::new(date, "A", "B", 10.0),
///     ExposureRow::new(date, "A", "C", 5.0),
/// ];
/// let metrics = aggregate(&rows, date);
///
/// assert_eq!(metrics[&InstitutionId::from("A")].volume, 15.0);
/// assert!((metrics[&InstitutionId::from("A")].centrality - 2.0 / 3.0).abs() < 1e-12);
/// assert!((metrics[&InstitutionId::from("B")].centrality - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn aggregate(
    exposures: &[ExposureRow],
    reference_date: NaiveDate,
) -> HashMap<InstitutionId, NetworkMetrics> {
    let mut accumulators: HashMap<&InstitutionId, Accumulator<'_>> = HashMap::new();

    for row in exposures
        .iter()
        .filter(|row| row.date == reference_date && !row.is_self_loop())
    {
        let amount = row.amount_or_default();

        let creditor = accumulators.entry(&row.creditor_id).or_default();
        creditor.volume += amount;
        creditor.counterparties.insert(&row.debtor_id);

        let debtor = accumulators.entry(&row.debtor_id).or_default();
        debtor.volume += amount;
        debtor.counterparties.insert(&row.creditor_id);
    }

    let connected = accumulators.len();
    accumulators
        .into_iter()
        .map(|(id, acc)| {
            let connections = acc.counterparties.len();
            let centrality = if connected > 0 {
                connections as f64 / connected as f64
            } else {
                0.0
            };
            (
                id.clone(),
                NetworkMetrics {
                    volume: acc.volume,
                    centrality,
                    connections,
                },
            )
        })
        .collect()
}
