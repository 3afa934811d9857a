//! Integration tests for the CLI commands against dataset files on disk.

use approx::assert_relative_eq;
use service_cli::commands::{analyse, predict, rank, simulate};
use service_cli::config::CliConfig;
use service_cli::dataset::load_dataset;
use service_cli::CliError;
use std::io::Write;
use tempfile::NamedTempFile;

const DATASET: &str = r#"{
    "metrics": [
        {"date": "2024-12-31", "institution_id": "A", "total_assets": 100, "leverage_ratio": 10, "cds_spread": 400},
        {"date": "2024-12-31", "institution_id": "B", "total_assets": 100, "leverage_ratio": 10, "cds_spread": 80},
        {"date": "2024-12-31", "institution_id": "C", "total_assets": 100, "leverage_ratio": 10, "cds_spread": 60}
    ],
    "network": [
        {"date": "2024-12-31", "creditor_id": "B", "debtor_id": "A", "exposure_amount": 60}
    ],
    "market": [
        {"date": "2024-12-31", "vix_index": 20}
    ],
    "labels": [
        {"date": "2024-11-30", "is_crisis": 1},
        {"date": "2024-12-31", "is_crisis": 0}
    ]
}"#;

fn dataset_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file
}

fn seeded() -> CliConfig {
    CliConfig {
        seed: Some(42),
        ..Default::default()
    }
}

#[test]
fn test_analyse() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let summary = analyse::execute(&dataset, &seeded(), Some(2)).unwrap();

    assert_eq!(summary.institution_count, 3);
    assert_eq!(summary.exposure_count, 1);
    assert_relative_eq!(summary.total_assets, 300.0);
    assert_eq!(summary.narrative.top_institutions.len(), 2);
    assert_eq!(summary.narrative.top_institutions[0].id.as_str(), "A");
    assert_eq!(
        summary.headline_probability,
        Some(summary.narrative.systemic_risk.value)
    );
}

#[test]
fn test_analyse_is_reproducible_with_seed() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let first = analyse::execute(&dataset, &seeded(), None).unwrap();
    let second = analyse::execute(&dataset, &seeded(), None).unwrap();
    assert_eq!(
        first.narrative.systemic_risk.value,
        second.narrative.systemic_risk.value
    );
}

#[test]
fn test_simulate() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let report = simulate::execute(&dataset, &seeded(), "A", None).unwrap();

    assert_eq!(report.failed_count, 2);
    assert_eq!(report.cascade_depth, 1);
    assert_relative_eq!(report.total_loss, 200.0);

    let contained = simulate::execute(&dataset, &seeded(), "A", Some(0.1)).unwrap();
    assert_eq!(contained.failed_count, 1);
}

#[test]
fn test_simulate_unknown_start() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let err = simulate::execute(&dataset, &seeded(), "Z", None).unwrap_err();
    assert!(matches!(err, CliError::Cascade(_)));
}

#[test]
fn test_simulate_rejects_bad_lgd() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let err = simulate::execute(&dataset, &seeded(), "A", Some(1.5)).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
}

#[test]
fn test_rank() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let output = rank::execute(&dataset, &seeded(), Some(3), None).unwrap();

    assert_eq!(output.top_n, 3);
    assert_eq!(output.rankings.len(), 3);
    assert_eq!(output.rankings[0].institution_id.as_str(), "A");
    assert_eq!(output.rankings[0].cascade_size, 2);
}

#[test]
fn test_predict() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    let output = predict::execute(&dataset, &seeded(), Some(6)).unwrap();

    assert_eq!(output.horizon_months, 6);
    assert_eq!(output.predictions.len(), 6);
    assert_eq!(output.predictions[0].timestamp, output.reference_date);
    for point in &output.predictions[1..] {
        assert!((0.25..0.35).contains(&point.probability));
    }
}

#[test]
fn test_predict_rejects_zero_horizon() {
    let file = dataset_file();
    let dataset = load_dataset(file.path()).unwrap();
    assert!(predict::execute(&dataset, &seeded(), Some(0)).is_err());
}

#[test]
fn test_missing_table() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"metrics": [], "network": []}"#).unwrap();
    let dataset = load_dataset(file.path()).unwrap();
    let err = analyse::execute(&dataset, &seeded(), None).unwrap_err();
    assert!(err.to_string().contains("market, labels"));
}
